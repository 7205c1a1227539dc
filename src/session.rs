//! 분석 결과/입력을 세션 동안 보관하는 저장소.
//!
//! 키마다 JSON 문자열 하나를 저장한다. 두 키 중 하나라도 없으면 "데이터 없음" 상태다.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::service::models::{AnalysisInput, AnalysisResult};

/// 분석 결과가 저장되는 키.
pub const RESULTS_KEY: &str = "whr_results";
/// 분석 입력이 저장되는 키.
pub const INPUT_KEY: &str = "whr_input";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 키-문자열 저장소.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove_item(&mut self, key: &str) -> Result<(), SessionError>;
    /// 세션 종료. 모든 키를 지운다.
    fn clear(&mut self) -> Result<(), SessionError>;
}

/// 프로세스가 살아 있는 동안만 유지되는 저장소.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), SessionError> {
        self.items.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.items.clear();
        Ok(())
    }
}

/// 디렉터리에 `<key>.json` 파일로 저장하는 저장소. CLI 실행 간에 세션을 공유한다.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// 디렉터리는 첫 쓰기 때 만든다.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        for key in [RESULTS_KEY, INPUT_KEY] {
            self.remove_item(key)?;
        }
        Ok(())
    }
}

/// 세션에서 읽어온 분석 한 건.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAnalysis {
    pub result: AnalysisResult,
    pub input: AnalysisInput,
}

/// `/analyze` 성공 직후 결과와 입력을 저장한다.
pub fn store_analysis(
    storage: &mut dyn SessionStorage,
    result: &AnalysisResult,
    input: &AnalysisInput,
) -> Result<(), SessionError> {
    let result_json = serde_json::to_string(result)?;
    let input_json = serde_json::to_string(input)?;
    // 결과와 입력은 항상 같은 분석에서 나온 쌍이어야 한다. 쓰기가 중간에 실패하면
    // 이전 입력과 새 결과가 섞이지 않도록 두 키를 모두 지운다.
    let written = storage
        .remove_item(INPUT_KEY)
        .and_then(|()| storage.set_item(RESULTS_KEY, &result_json))
        .and_then(|()| storage.set_item(INPUT_KEY, &input_json));
    if let Err(err) = written {
        tracing::warn!(error = %err, "session write failed, discarding stored analysis");
        for key in [RESULTS_KEY, INPUT_KEY] {
            if let Err(e) = storage.remove_item(key) {
                tracing::warn!(key, error = %e, "could not remove session entry");
            }
        }
        return Err(err);
    }
    tracing::debug!("analysis stored in session");
    Ok(())
}

/// 저장된 분석을 읽는다. 키가 없거나 내용이 깨졌으면 `None`(데이터 없음).
pub fn load_analysis(storage: &dyn SessionStorage) -> Result<Option<StoredAnalysis>, SessionError> {
    let (Some(raw_result), Some(raw_input)) =
        (storage.get_item(RESULTS_KEY)?, storage.get_item(INPUT_KEY)?)
    else {
        return Ok(None);
    };
    let result = match serde_json::from_str::<AnalysisResult>(&raw_result) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(key = RESULTS_KEY, error = %e, "ignoring corrupt session entry");
            return Ok(None);
        }
    };
    let input = match serde_json::from_str::<AnalysisInput>(&raw_input) {
        Ok(i) => i,
        Err(e) => {
            tracing::warn!(key = INPUT_KEY, error = %e, "ignoring corrupt session entry");
            return Ok(None);
        }
    };
    Ok(Some(StoredAnalysis { result, input }))
}
