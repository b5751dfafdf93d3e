pub fn format_srt_timestamp(seconds: f64) -> String {
    format_timestamp(seconds, ',')
}

pub fn format_vtt_timestamp(seconds: f64) -> String {
    format_timestamp(seconds, '.')
}

fn format_timestamp(t: f64, ms_sep: char) -> String {
    let hours = (t / 3600.0).floor() as i64;
    let minutes = ((t % 3600.0) / 60.0).floor() as i64;
    let secs = (t % 60.0).floor() as i64;
    let millis = ((t - t.floor()) * 1000.0).round() as i64;

    format!("{hours:02}:{minutes:02}:{secs:02}{ms_sep}{millis:03}")
}
