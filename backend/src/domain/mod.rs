pub mod aggregation;
pub mod badges;
pub mod expense_service;
pub mod report;
pub mod report_service;
