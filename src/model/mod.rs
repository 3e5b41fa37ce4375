pub mod attendance;
pub mod employee;
pub mod hr_user;
