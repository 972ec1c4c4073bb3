//! Host health snapshot for administrators.

use std::path::Path;

use sysinfo::System;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// A point-in-time view of the host the bot runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemReport {
    pub os_name: String,
    pub os_version: String,
    pub kernel_version: String,
    pub uptime_secs: u64,
    pub cpu_percent: f32,
    pub ram_percent: f64,
    pub total_memory_bytes: u64,
    pub available_memory_bytes: u64,
    pub bot_version: String,
}

impl SystemReport {
    /// Samples the host. CPU usage needs two refreshes separated by the
    /// minimum update interval, so this waits briefly.
    pub async fn collect(version_file: &Path) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
        sys.refresh_cpu_usage();

        let total = sys.total_memory();
        let available = sys.available_memory();
        let ram_percent = if total == 0 {
            0.0
        } else {
            (total.saturating_sub(available)) as f64 * 100.0 / total as f64
        };

        Self {
            os_name: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_default(),
            kernel_version: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
            uptime_secs: System::uptime(),
            cpu_percent: sys.global_cpu_usage(),
            ram_percent,
            total_memory_bytes: total,
            available_memory_bytes: available,
            bot_version: read_bot_version(version_file).await,
        }
    }
}

/// Reads the trimmed version string, or `Unknown` if the file is unreadable.
pub async fn read_bot_version(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) if !contents.trim().is_empty() => contents.trim().to_string(),
        Ok(_) => "Unknown".to_string(),
        Err(e) => {
            log::debug!("No version file at {}: {}", path.display(), e);
            "Unknown".to_string()
        }
    }
}

/// Formats an uptime as `HH:MM:SS` within the current day.
pub fn format_uptime(uptime_secs: u64) -> String {
    let secs = uptime_secs % 86_400;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Renders the report as Telegram HTML.
pub fn format_system_report(report: &SystemReport, bot_name: &str) -> String {
    format!(
        "<b>{} v.{}</b> \n\n\
         <b>OS:</b> {} {}\n\
         <b>Kernel Version:</b> {}\n\
         <b>System Uptime:</b> {}\n\n\
         <b>CPU Usage:</b> {:.1}%\n\
         <b>RAM Usage:</b> {:.1}%\n\n\
         <b>Total Memory:</b> {:.2} GB\n\
         <b>Available Memory:</b> {:.2} GB",
        crate::format::escape_html(bot_name),
        crate::format::escape_html(&report.bot_version),
        crate::format::escape_html(&report.os_name),
        crate::format::escape_html(&report.os_version),
        crate::format::escape_html(&report.kernel_version),
        format_uptime(report.uptime_secs),
        report.cpu_percent,
        report.ram_percent,
        report.total_memory_bytes as f64 / BYTES_PER_GB,
        report.available_memory_bytes as f64 / BYTES_PER_GB,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "00:00:00");
        assert_eq!(format_uptime(3_661), "01:01:01");
        // Wraps at one day
        assert_eq!(format_uptime(86_400 + 59), "00:00:59");
    }

    #[test]
    fn test_format_system_report() {
        let report = SystemReport {
            os_name: "Linux".to_string(),
            os_version: "24.04".to_string(),
            kernel_version: "6.8.0".to_string(),
            uptime_secs: 7_200,
            cpu_percent: 12.34,
            ram_percent: 50.0,
            total_memory_bytes: 8 * 1024 * 1024 * 1024,
            available_memory_bytes: 2 * 1024 * 1024 * 1024,
            bot_version: "1.2".to_string(),
        };
        let text = format_system_report(&report, "craft_bot");
        assert!(text.starts_with("<b>craft_bot v.1.2</b>"));
        assert!(text.contains("<b>OS:</b> Linux 24.04"));
        assert!(text.contains("<b>System Uptime:</b> 02:00:00"));
        assert!(text.contains("<b>CPU Usage:</b> 12.3%"));
        assert!(text.contains("<b>Total Memory:</b> 8.00 GB"));
        assert!(text.contains("<b>Available Memory:</b> 2.00 GB"));
    }

    #[test]
    fn test_host_strings_are_escaped() {
        let report = SystemReport {
            os_name: "Distro<X>".to_string(),
            os_version: "1 & 2".to_string(),
            kernel_version: "6.8.0-<custom>".to_string(),
            uptime_secs: 0,
            cpu_percent: 0.0,
            ram_percent: 0.0,
            total_memory_bytes: 0,
            available_memory_bytes: 0,
            bot_version: "1.2".to_string(),
        };
        let text = format_system_report(&report, "craft_bot");
        assert!(text.contains("<b>OS:</b> Distro&lt;X&gt; 1 &amp; 2"));
        assert!(text.contains("<b>Kernel Version:</b> 6.8.0-&lt;custom&gt;"));
    }

    #[tokio::test]
    async fn test_read_bot_version() {
        let mut file = NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b" 2.0.1\n").unwrap();
        assert_eq!(read_bot_version(file.path()).await, "2.0.1");
        assert_eq!(
            read_bot_version(Path::new("/nonexistent/version")).await,
            "Unknown"
        );
    }

    #[tokio::test]
    async fn test_collect_reports_memory() {
        let report = SystemReport::collect(Path::new("/nonexistent/version")).await;
        assert!(report.total_memory_bytes > 0);
        assert!(report.available_memory_bytes <= report.total_memory_bytes);
        assert_eq!(report.bot_version, "Unknown");
    }
}
