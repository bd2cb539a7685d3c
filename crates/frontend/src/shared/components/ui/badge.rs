use contracts::dashboards::d400_closing_tracker::{Priority, TaskStatus};
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    Primary,
    Success,
    Warning,
    Error,
    #[default]
    Neutral,
}

impl BadgeVariant {
    pub fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Primary => "badge badge--primary",
            BadgeVariant::Success => "badge badge--success",
            BadgeVariant::Warning => "badge badge--warning",
            BadgeVariant::Error => "badge badge--error",
            BadgeVariant::Neutral => "badge badge--neutral",
        }
    }

    pub fn for_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Completed => BadgeVariant::Success,
            TaskStatus::InProgress => BadgeVariant::Primary,
            TaskStatus::Waiting => BadgeVariant::Neutral,
            TaskStatus::Problems => BadgeVariant::Error,
        }
    }

    pub fn for_priority(priority: Priority) -> Self {
        match priority {
            Priority::High => BadgeVariant::Error,
            Priority::Medium => BadgeVariant::Warning,
            Priority::Low => BadgeVariant::Neutral,
        }
    }
}

/// Badge component with different variants
#[component]
pub fn Badge(
    #[prop(optional)] variant: BadgeVariant,
    /// Badge content
    children: Children,
) -> impl IntoView {
    view! {
        <span class=variant.class()>
            {children()}
        </span>
    }
}
