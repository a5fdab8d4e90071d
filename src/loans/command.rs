pub mod list_all_loans_cmd;
pub mod list_instances_cmd;
pub mod list_my_loans_cmd;
