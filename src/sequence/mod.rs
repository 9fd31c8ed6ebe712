pub mod int_gen;
