pub mod card_animated;
pub mod charts;
pub mod period_picker;
pub mod stat_card;
pub mod states;
pub mod ui;
