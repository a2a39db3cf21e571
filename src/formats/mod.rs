pub mod hpl;
