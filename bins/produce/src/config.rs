use clap::{Args, Parser};
use serde::Deserialize;

use pipeline::{HandoffConfig, Partitioner, ProduceConfig};
use produce_api::Encoding;

use crate::error::CliError;

const DEFAULT_BROKER: &str = "localhost:9092";

// ═══════════════════════════════════════════════════════════════
//  Config file (TOML)
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub topic: Option<String>,
    pub brokers: Option<Vec<String>>,
    pub partitions: Option<i32>,
    pub partitioner: Option<Partitioner>,
    pub partition: Option<i32>,
    pub literal: Option<bool>,
    pub decode_key: Option<Encoding>,
    pub decode_value: Option<Encoding>,
    pub file: Option<String>,
    pub buffer: Option<usize>,
    pub pretty: Option<bool>,
}

pub fn load_config(path: &str) -> Result<FileConfig, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::Config { context: "read", detail: format!("'{path}': {e}") })?;
    toml::from_str(&content)
        .map_err(|e| CliError::Config { context: "parse", detail: format!("'{path}': {e}") })
}

// ═══════════════════════════════════════════════════════════════
//  CLI args
// ═══════════════════════════════════════════════════════════════

#[derive(Parser)]
#[command(
    name = "kt-produce",
    version,
    about = "Read lines from stdin or a file and produce them as records"
)]
pub struct Cli {
    #[command(flatten)]
    pub args: ProduceArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ProduceArgs {
    /// Path to an optional TOML config file
    #[arg(long, default_value = "produce.toml", env = "KT_PRODUCE_CONFIG")]
    pub config: String,

    /// Topic to produce to
    #[arg(long, env = "KT_TOPIC")]
    pub topic: Option<String>,

    /// Comma separated list of brokers (default localhost:9092)
    #[arg(long, env = "KT_BROKERS")]
    pub brokers: Option<String>,

    /// Number of partitions of the topic
    #[arg(long)]
    pub partitions: Option<i32>,

    /// hashCode, hashCodeByValue or fixed
    #[arg(long)]
    pub partitioner: Option<Partitioner>,

    /// Partition for literal mode and the fixed partitioner
    #[arg(long)]
    pub partition: Option<i32>,

    /// Use each input line verbatim as the value (`--literal=false` overrides the file)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub literal: Option<bool>,

    /// Decode keys as string, hex or base64
    #[arg(long)]
    pub decode_key: Option<Encoding>,

    /// Decode values as string, hex or base64
    #[arg(long)]
    pub decode_value: Option<Encoding>,

    /// Read lines from this file instead of stdin
    #[arg(long)]
    pub file: Option<String>,

    /// Capacity of the line and record channels
    #[arg(long)]
    pub buffer: Option<usize>,

    /// Indent produced messages
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub pretty: Option<bool>,
}

// ═══════════════════════════════════════════════════════════════
//  Effective — merged config
// ═══════════════════════════════════════════════════════════════

/// Final configuration: defaults < config file < env/CLI.
#[derive(Debug)]
pub struct Effective {
    pub brokers: Vec<String>,
    pub partition_count: i32,
    pub produce: ProduceConfig,
    pub handoff: HandoffConfig,
    pub file: Option<String>,
    pub buffer: usize,
    pub pretty: bool,
}

impl Effective {
    pub fn new(args: &ProduceArgs) -> Result<Self, CliError> {
        let cfg = match load_config(&args.config) {
            Ok(c) => c,
            Err(e) => {
                if std::path::Path::new(&args.config).exists() {
                    return Err(e);
                }
                FileConfig::default()
            }
        };
        Self::merge(args, cfg)
    }

    pub fn merge(args: &ProduceArgs, cfg: FileConfig) -> Result<Self, CliError> {
        let topic = non_empty(args.topic.clone())
            .or(cfg.topic)
            .ok_or_else(|| CliError::Config {
                context: "topic",
                detail: "--topic or KT_TOPIC is required".into(),
            })?;

        let brokers = match non_empty(args.brokers.clone()) {
            Some(list) => split_brokers(&list),
            None => cfg.brokers.unwrap_or_default(),
        };
        let brokers = if brokers.is_empty() { vec![DEFAULT_BROKER.to_string()] } else { brokers };

        let produce = ProduceConfig {
            literal: args.literal.or(cfg.literal).unwrap_or(false),
            partitioner: args.partitioner.or(cfg.partitioner).unwrap_or_default(),
            partition: args.partition.or(cfg.partition).unwrap_or(0),
        };
        let partition_count = args.partitions.or(cfg.partitions).unwrap_or(0);
        produce.validate(partition_count)?;

        let buffer = args.buffer.or(cfg.buffer).unwrap_or(1);
        if buffer == 0 {
            return Err(CliError::Config { context: "buffer", detail: "must be at least 1".into() });
        }

        let handoff = HandoffConfig {
            topic,
            key_encoding: args.decode_key.or(cfg.decode_key).unwrap_or_default(),
            value_encoding: args.decode_value.or(cfg.decode_value).unwrap_or_default(),
        };

        Ok(Self {
            brokers,
            partition_count,
            produce,
            handoff,
            file: args.file.clone().or(cfg.file),
            buffer,
            pretty: args.pretty.or(cfg.pretty).unwrap_or(false),
        })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

fn split_brokers(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(topic: &str) -> ProduceArgs {
        ProduceArgs {
            topic: Some(topic.into()),
            partitions: Some(3),
            ..ProduceArgs::default()
        }
    }

    #[test]
    fn brokers_default_to_localhost() {
        let eff = Effective::merge(&args("test-topic"), FileConfig::default()).unwrap();
        assert_eq!(eff.handoff.topic, "test-topic");
        assert_eq!(eff.brokers, vec!["localhost:9092"]);
        assert_eq!(eff.buffer, 1);
        assert_eq!(eff.produce, ProduceConfig::default());
    }

    #[test]
    fn command_line_wins_over_file() {
        let mut a = args("test-topic");
        a.brokers = Some("hans:9092, blubb:9093".into());
        let cfg = FileConfig {
            topic: Some("BLUBB".into()),
            brokers: Some(vec!["BLABB".into()]),
            partitions: Some(10),
            ..FileConfig::default()
        };
        let eff = Effective::merge(&a, cfg).unwrap();
        assert_eq!(eff.handoff.topic, "test-topic");
        assert_eq!(eff.brokers, vec!["hans:9092", "blubb:9093"]);
        assert_eq!(eff.partition_count, 3);
    }

    #[test]
    fn file_fills_missing_args() {
        let a = ProduceArgs { topic: Some(String::new()), ..ProduceArgs::default() };
        let cfg: FileConfig = toml::from_str(
            r#"
            topic = "from-file"
            brokers = ["kafka-1:9092"]
            partitions = 6
            partitioner = "hashCodeByValue"
            decode_value = "base64"
            "#,
        )
        .unwrap();
        let eff = Effective::merge(&a, cfg).unwrap();
        assert_eq!(eff.handoff.topic, "from-file");
        assert_eq!(eff.brokers, vec!["kafka-1:9092"]);
        assert_eq!(eff.partition_count, 6);
        assert_eq!(eff.produce.partitioner, Partitioner::HashCodeByValue);
        assert_eq!(eff.handoff.value_encoding, Encoding::Base64);
        assert_eq!(eff.handoff.key_encoding, Encoding::String);
    }

    #[test]
    fn topic_is_required() {
        let err = Effective::merge(&ProduceArgs::default(), FileConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Config { context: "topic", .. }));
    }

    #[test]
    fn hash_partitioning_needs_partition_count() {
        let a = ProduceArgs { topic: Some("t".into()), ..ProduceArgs::default() };
        let err = Effective::merge(&a, FileConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Pipeline(_)), "{err}");
    }

    #[test]
    fn literal_mode_needs_no_partition_count() {
        let a = ProduceArgs {
            topic: Some("t".into()),
            literal: Some(true),
            partition: Some(2),
            ..ProduceArgs::default()
        };
        let eff = Effective::merge(&a, FileConfig::default()).unwrap();
        assert_eq!(eff.produce, ProduceConfig { literal: true, partitioner: Partitioner::HashCode, partition: 2 });
    }

    #[test]
    fn command_line_switches_off_file_flags() {
        let cfg: FileConfig = toml::from_str(
            r#"
            topic = "t"
            partitions = 4
            literal = true
            pretty = true
            "#,
        )
        .unwrap();
        let a = ProduceArgs { literal: Some(false), pretty: Some(false), ..ProduceArgs::default() };
        let eff = Effective::merge(&a, cfg).unwrap();
        assert!(!eff.produce.literal);
        assert!(!eff.pretty);

        let cfg: FileConfig = toml::from_str("topic = \"t\"\nliteral = true\npretty = true").unwrap();
        let eff = Effective::merge(&ProduceArgs::default(), cfg).unwrap();
        assert!(eff.produce.literal);
        assert!(eff.pretty);
    }

    #[test]
    fn zero_buffer_is_rejected() {
        let mut a = args("t");
        a.buffer = Some(0);
        let err = Effective::merge(&a, FileConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Config { context: "buffer", .. }));
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "kt-produce",
            "--topic", "events",
            "--partitions", "4",
            "--partitioner", "fixed",
            "--partition", "1",
            "--decode-key", "hex",
        ])
        .unwrap();
        assert_eq!(cli.args.partitioner, Some(Partitioner::Fixed));
        assert_eq!(cli.args.decode_key, Some(Encoding::Hex));
        assert!(Cli::try_parse_from(["kt-produce", "--partitioner", "random"]).is_err());
    }

    #[test]
    fn boolean_flags_take_an_optional_value() {
        let cli = Cli::try_parse_from(["kt-produce", "--literal", "--pretty=false"]).unwrap();
        assert_eq!(cli.args.literal, Some(true));
        assert_eq!(cli.args.pretty, Some(false));

        let cli = Cli::try_parse_from(["kt-produce", "--literal=false"]).unwrap();
        assert_eq!(cli.args.literal, Some(false));
        assert_eq!(cli.args.pretty, None);
    }
}
