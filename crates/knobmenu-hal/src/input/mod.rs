pub mod rotary;
