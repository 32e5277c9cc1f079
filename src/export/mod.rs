pub mod excel;

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// 出力ファイル名（分単位のタイムスタンプ、':' は '-' に置換）
pub fn header_file_name(now: &DateTime<Local>) -> String {
    format!("header-{}.xlsx", now.format("%Y-%m-%d %H:%M")).replace(':', "-")
}

/// 出力先がディレクトリ（または拡張子なし）ならタイムスタンプ名を付ける
pub fn output_path(output: &Path, now: &DateTime<Local>) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(header_file_name(now))
    } else {
        output.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 5, 9, 7, 45).unwrap()
    }

    #[test]
    fn test_header_file_name() {
        assert_eq!(header_file_name(&fixed_time()), "header-2026-03-05 09-07.xlsx");
    }

    #[test]
    fn test_output_path_explicit_file() {
        let path = output_path(Path::new("/tmp/custom.xlsx"), &fixed_time());
        assert_eq!(path, PathBuf::from("/tmp/custom.xlsx"));
    }

    #[test]
    fn test_output_path_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), &fixed_time());
        assert_eq!(path, dir.path().join("header-2026-03-05 09-07.xlsx"));
    }
}
