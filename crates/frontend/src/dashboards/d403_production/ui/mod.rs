pub mod dashboard;

pub use dashboard::ProductionDashboard;
