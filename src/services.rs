pub mod auth;
pub mod report_service;
pub mod revenue_chart;
