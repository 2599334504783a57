use chrono_tz::{Tz, TZ_VARIANTS};

/// Все зоны IANA для выбора часового пояса профиля, по алфавиту
pub fn profile_timezones() -> Vec<&'static str> {
    let mut zones: Vec<&'static str> = TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
    zones.sort_unstable();
    zones
}

pub fn is_known_timezone(name: &str) -> bool {
    name.parse::<Tz>().is_ok()
}
