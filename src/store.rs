//! 계산 이력을 행 단위로 쌓아두는 저장소.
//! 헤더 기반의 평면 행만 다루며, 원가 계산 모델과는 분리되어 있다.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 저장소 접근 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 파일 입출력 오류
    #[error("저장소 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 직렬화 오류
    #[error("행 직렬화 오류: {0}")]
    Serialize(#[from] serde_json::Error),
    /// 헤더와 값 개수 불일치
    #[error("헤더 {headers}개와 값 {values}개의 개수가 다릅니다")]
    ShapeMismatch { headers: usize, values: usize },
}

/// 저장된 한 행. 열 순서를 보존한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    pub headers: Vec<String>,
    pub values: Vec<String>,
}

impl RowRecord {
    pub fn new(headers: Vec<String>, values: Vec<String>) -> Result<Self, StoreError> {
        if headers.len() != values.len() {
            return Err(StoreError::ShapeMismatch {
                headers: headers.len(),
                values: values.len(),
            });
        }
        Ok(Self { headers, values })
    }

    /// 열 이름으로 값을 찾는다.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(self.values.iter())
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

/// 행 단위 추가 전용 저장소.
pub trait RowStore {
    /// 행 하나를 끝에 추가한다.
    fn append_row(&mut self, headers: &[String], values: &[String]) -> Result<(), StoreError>;
    /// 저장된 모든 행을 추가된 순서대로 돌려준다.
    fn list_rows(&self) -> Result<Vec<RowRecord>, StoreError>;
}

/// 메모리 저장소. 테스트나 임베딩 용도.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    rows: Vec<RowRecord>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RowStore for MemoryRowStore {
    fn append_row(&mut self, headers: &[String], values: &[String]) -> Result<(), StoreError> {
        let row = RowRecord::new(headers.to_vec(), values.to_vec())?;
        self.rows.push(row);
        Ok(())
    }

    fn list_rows(&self) -> Result<Vec<RowRecord>, StoreError> {
        Ok(self.rows.clone())
    }
}

/// 한 줄에 JSON 객체 하나씩 기록하는 파일 저장소.
#[derive(Debug, Clone)]
pub struct JsonlRowStore {
    path: PathBuf,
}

impl JsonlRowStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowStore for JsonlRowStore {
    fn append_row(&mut self, headers: &[String], values: &[String]) -> Result<(), StoreError> {
        let row = RowRecord::new(headers.to_vec(), values.to_vec())?;
        let mut line = serde_json::to_string(&row)?;
        line.push('\n');
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        tracing::info!(path = %self.path.display(), columns = row.headers.len(), "행 저장");
        Ok(())
    }

    fn list_rows(&self) -> Result<Vec<RowRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let mut rows = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RowRecord>(line) {
                Ok(row) if row.headers.len() == row.values.len() => rows.push(row),
                Ok(_) => tracing::warn!(line = idx + 1, "헤더/값 개수가 다른 행을 건너뜁니다"),
                Err(e) => tracing::warn!(line = idx + 1, error = %e, "손상된 행을 건너뜁니다"),
            }
        }
        Ok(rows)
    }
}

/// 일치 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Contains,
}

/// 열 하나에 대한 이력 필터.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub column: String,
    pub needle: String,
    pub mode: MatchMode,
}

impl RowFilter {
    pub fn exact(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            needle: needle.into(),
            mode: MatchMode::Exact,
        }
    }

    pub fn contains(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            needle: needle.into(),
            mode: MatchMode::Contains,
        }
    }

    /// 열이 없는 행은 일치하지 않는다.
    pub fn matches(&self, row: &RowRecord) -> bool {
        match row.get(&self.column) {
            Some(value) => match self.mode {
                MatchMode::Exact => value.trim() == self.needle.trim(),
                MatchMode::Contains => value.contains(self.needle.as_str()),
            },
            None => false,
        }
    }
}

/// 필터에 맞는 행을 원래 순번과 함께 돌려준다.
pub fn filter_rows<'a>(
    rows: &'a [RowRecord],
    filter: Option<&RowFilter>,
) -> Vec<(usize, &'a RowRecord)> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| filter.map_or(true, |f| f.matches(row)))
        .collect()
}
