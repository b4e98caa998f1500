//! Host device information for the info screen

use sysinfo::{CpuExt, DiskExt, System, SystemExt};

use crate::core::progress::format_bytes;

/// Snapshot of the host for display purposes
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub os_name: String,
    pub os_version: String,
    pub hostname: String,
    pub arch: String,
    pub cpu_brand: String,
    pub cpu_count: usize,
    /// Aggregate CPU load in percent at snapshot time
    pub cpu_usage: f32,
    pub total_memory: u64,
    pub used_memory: u64,
    pub disks: Vec<DiskInfo>,
}

#[derive(Debug, Clone)]
pub struct DiskInfo {
    pub mount_point: String,
    pub total_space: u64,
    pub available_space: u64,
}

impl DeviceInfo {
    /// Take a fresh snapshot of the running host.
    ///
    /// Blocks briefly: CPU usage needs two samples spaced by the minimum
    /// update interval.
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        std::thread::sleep(System::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu();
        let cpu_usage = sys.global_cpu_info().cpu_usage();

        let disks = sys
            .disks()
            .iter()
            .map(|disk| DiskInfo {
                mount_point: disk.mount_point().display().to_string(),
                total_space: disk.total_space(),
                available_space: disk.available_space(),
            })
            .collect();

        Self {
            os_name: sys.name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: sys.os_version().unwrap_or_else(|| "Unknown".to_string()),
            hostname: sys.host_name().unwrap_or_else(|| "Unknown".to_string()),
            arch: std::env::consts::ARCH.to_string(),
            cpu_brand: sys.global_cpu_info().brand().to_string(),
            cpu_count: sys.cpus().len(),
            cpu_usage,
            total_memory: sys.total_memory(),
            used_memory: sys.used_memory(),
            disks,
        }
    }

    pub fn memory_summary(&self) -> String {
        format!(
            "{} / {}",
            format_bytes(self.used_memory),
            format_bytes(self.total_memory)
        )
    }
}

impl DiskInfo {
    pub fn summary(&self) -> String {
        format!(
            "{}: {} free of {}",
            self.mount_point,
            format_bytes(self.available_space),
            format_bytes(self.total_space)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_populates_fields() {
        let info = DeviceInfo::collect();
        assert!(!info.arch.is_empty());
        assert!(info.cpu_count > 0);
        assert!(info.total_memory > 0);
        assert!(info.cpu_usage.is_finite());
        assert!((0.0..=100.0).contains(&info.cpu_usage));
    }

    #[test]
    fn test_disk_summary_format() {
        let disk = DiskInfo {
            mount_point: "/".to_string(),
            total_space: 1024 * 1024 * 1024,
            available_space: 512 * 1024 * 1024,
        };
        assert_eq!(disk.summary(), "/: 512.0 MB free of 1.0 GB");
    }
}
