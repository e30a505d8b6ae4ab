pub mod tricount;
