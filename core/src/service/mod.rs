pub mod response;
pub mod task_service;
