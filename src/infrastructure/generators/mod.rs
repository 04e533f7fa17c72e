pub mod kusho;

pub use kusho::Kusho;
