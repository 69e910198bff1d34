/// Render a second count as `HH:MM:SS`, each field zero-padded to two digits.
/// Hours are not wrapped at 24.
pub fn format_duration(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    format!("{hrs:02}:{mins:02}:{secs:02}")
}
