pub mod pbc;
