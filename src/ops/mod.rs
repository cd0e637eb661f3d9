pub mod ids;
pub mod validation;
pub mod repository;
pub mod session;
pub mod project_list;
pub mod resolver;
pub mod task_store;
pub mod project_detail;
