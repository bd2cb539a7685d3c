pub mod d400_closing_tracker;
pub mod d401_financial_analytics;
pub mod d402_installments;
pub mod d403_production;

pub use d400_closing_tracker::ui::ClosingTrackerDashboard;
pub use d401_financial_analytics::ui::FinancialAnalyticsDashboard;
pub use d402_installments::ui::InstallmentsDashboard;
pub use d403_production::ui::ProductionDashboard;
