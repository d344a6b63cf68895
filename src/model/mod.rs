mod balance;
mod muscle;
mod pose;
mod skeleton;

pub use balance::*;
pub use muscle::*;
pub use pose::*;
pub use skeleton::*;
