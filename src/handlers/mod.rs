pub mod booking;
pub mod drinks;
pub mod greetings;
pub mod service;
pub mod trivia;
