pub mod add;
pub mod clock;
pub mod echo;
