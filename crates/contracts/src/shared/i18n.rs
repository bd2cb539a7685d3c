//! UI language and translation lookup.

use serde::{Deserialize, Serialize};

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    Uz,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::Uz => "uz",
            Locale::En => "en",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::Ru => "Русский",
            Locale::Uz => "O'zbekcha",
            Locale::En => "English",
        }
    }

    /// Exact code match (`"ru"`, `"uz"`, `"en"`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ru" => Some(Locale::Ru),
            "uz" => Some(Locale::Uz),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Maps a browser language tag (`"uz-Latn-UZ"`, `"en_US"`) to a locale.
    pub fn detect(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        Self::from_code(primary).unwrap_or_default()
    }

    pub fn all() -> [Locale; 3] {
        [Locale::Ru, Locale::Uz, Locale::En]
    }
}

// (key, ru, uz, en)
const TRANSLATIONS: &[(&str, &str, &str, &str)] = &[
    // shell
    ("app.title", "BI-панель", "BI-panel", "BI dashboard"),
    ("tab.closing", "Закрытие месяца", "Oyni yopish", "Month closing"),
    ("tab.financial", "Финансы", "Moliya", "Financials"),
    ("tab.installments", "Рассрочка", "Muddatli to'lov", "Installments"),
    ("tab.production", "Производство", "Ishlab chiqarish", "Production"),
    ("theme.dark", "Тёмная", "Qorong'i", "Dark"),
    ("theme.light", "Светлая", "Yorug'", "Light"),
    ("theme.toggle", "Сменить тему", "Mavzuni almashtirish", "Toggle theme"),
    // common
    ("common.loading", "Загрузка данных...", "Ma'lumotlar yuklanmoqda...", "Loading data..."),
    ("common.no_data", "Нет данных", "Ma'lumot yo'q", "No data"),
    ("common.error", "Ошибка", "Xatolik", "Error"),
    ("common.all", "Все", "Barchasi", "All"),
    ("common.total", "Итого", "Jami", "Total"),
    ("common.year", "Год", "Yil", "Year"),
    ("common.month", "Месяц", "Oy", "Month"),
    ("common.from", "С", "Dan", "From"),
    ("common.to", "По", "Gacha", "To"),
    ("common.apply", "Применить", "Qo'llash", "Apply"),
    ("common.invalid_period", "Начало периода позже конца", "Davr boshi oxiridan keyin", "Period start is after its end"),
    // closing tracker
    ("closing.title", "Трекер закрытия месяца SAP", "SAP oyni yopish trekeri", "SAP month-closing tracker"),
    ("closing.department", "Отдел", "Bo'lim", "Department"),
    ("closing.status", "Статус", "Holat", "Status"),
    ("closing.task", "Задача", "Vazifa", "Task"),
    ("closing.executor", "Исполнитель", "Ijrochi", "Executor"),
    ("closing.planned_date", "План", "Reja", "Planned"),
    ("closing.actual_date", "Факт", "Haqiqiy", "Actual"),
    ("closing.progress", "Прогресс", "Jarayon", "Progress"),
    ("closing.deviation", "Отклонение, ч", "Og'ish, soat", "Deviation, h"),
    ("closing.priority", "Приоритет", "Muhimlik", "Priority"),
    ("closing.completion_rate", "Выполнено", "Bajarildi", "Completion"),
    ("closing.average_progress", "Средний прогресс", "O'rtacha jarayon", "Average progress"),
    ("closing.delayed", "С задержкой", "Kechikkan", "Delayed"),
    ("closing.by_department", "Прогресс по отделам", "Bo'limlar bo'yicha", "Progress by department"),
    ("closing.by_status", "Задачи по статусам", "Holatlar bo'yicha", "Tasks by status"),
    ("status.completed", "Завершено", "Bajarilgan", "Completed"),
    ("status.inProgress", "В работе", "Jarayonda", "In progress"),
    ("status.waiting", "Ожидание", "Kutilmoqda", "Waiting"),
    ("status.problems", "Проблемы", "Muammolar", "Problems"),
    ("priority.high", "Высокий", "Yuqori", "High"),
    ("priority.medium", "Средний", "O'rta", "Medium"),
    ("priority.low", "Низкий", "Past", "Low"),
    // financial analytics
    ("financial.title", "Финансовая аналитика", "Moliyaviy tahlil", "Financial analytics"),
    ("financial.retail", "Розница", "Chakana", "Retail"),
    ("financial.wholesale", "Опт", "Ulgurji", "Wholesale"),
    ("financial.promo", "Промо", "Promo", "Promo"),
    ("financial.by_month", "Продажи по месяцам", "Oylar bo'yicha savdo", "Sales by month"),
    ("financial.structure", "Структура продаж", "Savdo tarkibi", "Sales structure"),
    ("financial.by_year", "Итоги по годам", "Yillar bo'yicha", "Totals by year"),
    ("financial.growth", "Рост", "O'sish", "Growth"),
    ("financial.average", "В среднем за месяц", "Oylik o'rtacha", "Monthly average"),
    ("financial.best_month", "Лучший месяц", "Eng yaxshi oy", "Best month"),
    // installments
    ("installments.title", "Рассрочка по моделям и регионам", "Modellar va hududlar bo'yicha muddatli to'lov", "Installments by model and region"),
    ("installments.region", "Регион", "Hudud", "Region"),
    ("installments.model", "Модель", "Model", "Model"),
    ("installments.contracts", "Договоры", "Shartnomalar", "Contracts"),
    ("installments.total_price", "Сумма договоров", "Shartnomalar summasi", "Contract value"),
    ("installments.paid", "Оплачено", "To'langan", "Paid"),
    ("installments.prepayment", "Предоплата", "Oldindan to'lov", "Prepayment"),
    ("installments.overdue", "Просрочено", "Muddati o'tgan", "Overdue"),
    ("installments.remaining", "Остаток", "Qoldiq", "Remaining"),
    ("installments.structure", "Структура платежей", "To'lovlar tarkibi", "Payment structure"),
    ("installments.by_region", "По регионам", "Hududlar bo'yicha", "By region"),
    ("installments.by_model", "По моделям", "Modellar bo'yicha", "By model"),
    ("installments.fetch_failed", "Не удалось загрузить данные рассрочки", "Muddatli to'lov ma'lumotlarini yuklab bo'lmadi", "Failed to load installment data"),
    // production
    ("production.title", "Производство и склад", "Ishlab chiqarish va ombor", "Production and warehouse"),
    ("production.daily", "По дням", "Kunlar bo'yicha", "Daily"),
    ("production.monthly", "По месяцам", "Oylar bo'yicha", "Monthly"),
    ("production.planned", "План", "Reja", "Plan"),
    ("production.actual", "Факт", "Haqiqiy", "Actual"),
    ("production.completion", "Выполнение плана", "Reja bajarilishi", "Plan completion"),
    ("production.deviation", "Отклонение", "Og'ish", "Deviation"),
    ("production.best", "Лучший период", "Eng yaxshi davr", "Best period"),
    ("production.below_plan", "Ниже плана", "Rejadan past", "Below plan"),
    ("production.warehouse", "Склад", "Ombor", "Warehouse"),
    ("production.in_stock", "На складе", "Omborda", "In stock"),
    ("production.reserved", "Резерв", "Zaxira", "Reserved"),
    ("production.in_transit", "В пути", "Yo'lda", "In transit"),
    ("production.share", "Доля", "Ulush", "Share"),
];

/// Looks up `key`; unknown keys come back unchanged.
pub fn t(locale: Locale, key: &'static str) -> &'static str {
    TRANSLATIONS
        .iter()
        .find(|(k, ..)| *k == key)
        .map(|(_, ru, uz, en)| match locale {
            Locale::Ru => *ru,
            Locale::Uz => *uz,
            Locale::En => *en,
        })
        .unwrap_or(key)
}

const MONTHS_RU: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
    "Октябрь", "Ноябрь", "Декабрь",
];
const MONTHS_UZ: [&str; 12] = [
    "Yanvar", "Fevral", "Mart", "Aprel", "May", "Iyun", "Iyul", "Avgust", "Sentabr", "Oktabr",
    "Noyabr", "Dekabr",
];
const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Full month name, `month` in 1..=12. Out-of-range months yield `""`.
pub fn month_name(locale: Locale, month: u32) -> &'static str {
    let table = match locale {
        Locale::Ru => &MONTHS_RU,
        Locale::Uz => &MONTHS_UZ,
        Locale::En => &MONTHS_EN,
    };
    month
        .checked_sub(1)
        .and_then(|idx| table.get(idx as usize))
        .copied()
        .unwrap_or("")
}

/// First three letters of the month name, for chart axes.
pub fn month_short(locale: Locale, month: u32) -> String {
    month_name(locale, month).chars().take(3).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Locale::detect("uz-UZ"), Locale::Uz);
        assert_eq!(Locale::detect("uz-Latn-UZ"), Locale::Uz);
        assert_eq!(Locale::detect("en_US"), Locale::En);
        assert_eq!(Locale::detect("RU"), Locale::Ru);
        assert_eq!(Locale::detect("de-DE"), Locale::Ru);
        assert_eq!(Locale::detect(""), Locale::Ru);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(t(Locale::En, "status.inProgress"), "In progress");
        assert_eq!(t(Locale::Ru, "common.total"), "Итого");
        assert_eq!(t(Locale::Uz, "installments.overdue"), "Muddati o'tgan");
        assert_eq!(t(Locale::En, "missing.key"), "missing.key");
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<&str> = TRANSLATIONS.iter().map(|(k, ..)| *k).collect();
        keys.sort_unstable();
        let before = keys.len();
        keys.dedup();
        assert_eq!(before, keys.len());
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(Locale::Ru, 1), "Январь");
        assert_eq!(month_name(Locale::En, 12), "December");
        assert_eq!(month_name(Locale::Uz, 0), "");
        assert_eq!(month_name(Locale::Uz, 13), "");
        assert_eq!(month_short(Locale::Ru, 2), "Фев");
        assert_eq!(month_short(Locale::En, 9), "Sep");
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Locale::Uz).unwrap(), "\"uz\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
