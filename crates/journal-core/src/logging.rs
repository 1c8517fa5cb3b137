//! tracing 기반 로깅 초기화.
//!
//! 명령 결과(표, JSON)는 stdout을 쓰므로 로그는 stderr로만 보냅니다.
//! `RUST_LOG`가 있으면 설정 파일의 레벨보다 우선합니다.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;
use crate::error::{JournalError, JournalResult};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 여러 줄, 색상 포함
    Pretty,
    /// 한 줄에 JSON 객체 하나
    Json,
    /// 한 줄 요약 (기본값)
    #[default]
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(JournalError::Config(format!("알 수 없는 로그 형식: {}", other))),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 필터 지시문 (예: "warn", "journal_store=debug")
    pub level: String,
    pub format: LogFormat,
    /// 스토어 작업 span의 시작/종료 기록
    pub trace_operations: bool,
    /// 소스 파일 위치 포함
    pub with_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            trace_operations: false,
            with_file: false,
        }
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 스토어 작업 span(`initialize`, `add_trade` 등)의 시작/종료를 기록합니다.
    pub fn with_operation_tracing(mut self, enabled: bool) -> Self {
        self.trace_operations = enabled;
        self
    }
}

impl From<&LoggingConfig> for LogConfig {
    /// 잘못된 형식 문자열은 기본 형식으로 대체합니다.
    fn from(config: &LoggingConfig) -> Self {
        let format = config.format.parse().unwrap_or_default();
        // debug 이하에서는 작업 span도 함께 본다
        let verbose = matches!(config.level.trim(), "debug" | "trace");
        Self::new(config.level.clone())
            .with_format(format)
            .with_operation_tracing(verbose)
    }
}

/// 전역 subscriber를 설치합니다. 프로세스당 한 번만 성공합니다.
pub fn init_logging(config: LogConfig) -> JournalResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| JournalError::Config(format!("로그 레벨 '{}': {}", config.level, e)))?,
    };

    let span_events = if config.trace_operations {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let base = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.with_file)
        .with_line_number(config.with_file)
        .with_span_events(span_events);

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().boxed(),
        LogFormat::Compact => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| JournalError::Config(format!("로깅 초기화 실패: {}", e)))?;

    tracing::debug!(format = ?config.format, level = %config.level, "로깅 초기화");
    Ok(())
}

/// 스토어 작업 span을 만듭니다. 거래 ID와 종목을 필드로 붙일 수 있습니다.
#[macro_export]
macro_rules! journal_span {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $trade_id:expr) => {
        tracing::info_span!($name, trade_id = %$trade_id)
    };
    ($name:expr, $trade_id:expr, $instrument:expr) => {
        tracing::info_span!($name, trade_id = %$trade_id, instrument = %$instrument)
    };
}
