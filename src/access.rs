use thiserror::Error;

/// 접속 비밀번호 확인 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("올바른 비밀번호를 입력하세요.")]
    Denied,
}

/// 공유 비밀번호 하나로 모든 기능을 막는 접속 관문.
/// 비밀번호가 설정되지 않으면 항상 열려 있다.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    secret: Option<String>,
}

impl AccessGate {
    pub fn new(secret: Option<String>) -> Self {
        let secret = secret.filter(|s| !s.is_empty());
        Self { secret }
    }

    pub fn is_open(&self) -> bool {
        self.secret.is_none()
    }

    /// 입력한 비밀번호를 확인한다. 첫 불일치 위치와 상관없이 끝까지 비교한다.
    pub fn verify(&self, attempt: &str) -> Result<(), AccessError> {
        let Some(secret) = self.secret.as_deref() else {
            return Ok(());
        };
        let a = secret.as_bytes();
        let b = attempt.as_bytes();
        let mut diff = a.len() ^ b.len();
        for i in 0..a.len().max(b.len()) {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            diff |= usize::from(x ^ y);
        }
        if diff == 0 {
            Ok(())
        } else {
            Err(AccessError::Denied)
        }
    }
}
