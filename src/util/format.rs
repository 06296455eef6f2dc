const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

struct Civil {
    year: i64,
    month: usize,
    day: u32,
    hour: u32,
    minute: u32,
}

fn local_time(seconds: u32) -> Option<Civil> {
    let time = seconds as libc::time_t;
    // SAFETY: an all-zero `tm` is a valid value, and localtime_r only writes
    // through the pointers it is given.
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::localtime_r(&time, &mut tm) };
    if result.is_null() {
        return None;
    }

    Some(Civil {
        year: tm.tm_year as i64 + 1900,
        month: tm.tm_mon as usize,
        day: tm.tm_mday as u32,
        hour: tm.tm_hour as u32,
        minute: tm.tm_min as u32,
    })
}

/// `Mon dd HH:MM YYYY` in local time, day padded with a space.
pub fn pretty_timestamp(seconds: u32) -> String {
    match local_time(seconds) {
        Some(civil) if civil.month < MONTHS.len() => format!(
            "{} {:>2} {:02}:{:02} {}",
            MONTHS[civil.month], civil.day, civil.hour, civil.minute, civil.year
        ),
        _ => format!("@{}", seconds),
    }
}
