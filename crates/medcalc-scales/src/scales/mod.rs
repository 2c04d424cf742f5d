pub mod alvarado;
pub mod apfel;
pub mod asa;
pub mod avpu;
pub mod beck;
pub mod bishop;
pub mod chads2;
pub mod lown;
pub mod pediatric_gcs;
pub mod tnm;
