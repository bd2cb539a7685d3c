/// Утилиты сортировки таблиц: индикатор направления и переключение поля
use leptos::prelude::*;

/// Индикатор сортировки для заголовка колонки
pub fn get_sort_indicator<F: PartialEq>(current_field: &F, field: &F, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// Клик по той же колонке меняет направление, по другой сортирует по возрастанию
pub fn toggle_sort<F>(field: F, sort_field: RwSignal<F>, sort_ascending: RwSignal<bool>)
where
    F: PartialEq + Send + Sync + 'static,
{
    if sort_field.with_untracked(|current| *current == field) {
        sort_ascending.update(|v| *v = !*v);
    } else {
        sort_field.set(field);
        sort_ascending.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator(&"name", &"name", true), " ▲");
        assert_eq!(get_sort_indicator(&"name", &"name", false), " ▼");
        assert_eq!(get_sort_indicator(&"name", &"progress", true), " ⇅");
    }
}
