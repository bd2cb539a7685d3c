pub mod d400_closing_tracker;
pub mod d401_financial_analytics;
pub mod d402_installments;
pub mod d403_production;
