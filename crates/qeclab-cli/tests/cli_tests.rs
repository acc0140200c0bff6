//! CLI parsing and helper tests.
//!
//! The CLI is a binary crate, so argument parsing is checked on equivalent
//! clap structs and the helpers are exercised through the library crates
//! they wrap.

// ============================================================================
// commands::common equivalents
// ============================================================================

mod common_tests {
    use qeclab_adapter_sim::default_registry;
    use qeclab_hal::{Backend, BackendConfig};

    /// Equivalent to commands::common::create_engine
    fn create_engine(name: &str, seed: Option<u64>) -> anyhow::Result<Box<dyn Backend>> {
        let mut config = BackendConfig::new(name);
        if let Some(seed) = seed {
            config = config.with_extra("seed", serde_json::json!(seed));
        }
        Ok(default_registry().create(name, config)?)
    }

    #[test]
    fn test_create_known_engines() {
        for name in ["stabilizer", "statevector"] {
            let engine = create_engine(name, Some(3)).unwrap();
            assert_eq!(engine.name(), name);
        }
    }

    #[test]
    fn test_create_unknown_engine() {
        let err = create_engine("quantum_annealer", None).err().unwrap();
        assert!(err.to_string().contains("quantum_annealer"));
    }
}

// ============================================================================
// Configuration files
// ============================================================================

mod config_loading {
    use std::io::Write;

    use qeclab_codes::{CodeKind, LogicalBit};
    use qeclab_sweep::SweepConfig;

    fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_yaml_config() {
        let file = write_config(
            ".yaml",
            "code: steane\nnoise: depolarizing\nps: [0.01, 0.02]\nshots: 256\nlogical_bit: \"1\"\n",
        );
        let config = SweepConfig::from_file(file.path()).unwrap();
        assert_eq!(config.code, CodeKind::Steane);
        assert_eq!(config.noise, "depolarizing");
        assert_eq!(config.ps, vec![0.01, 0.02]);
        assert_eq!(config.shots, 256);
        assert_eq!(config.logical_bit, LogicalBit::One);
        assert_eq!(config.engine, "stabilizer");
    }

    #[test]
    fn test_json_config() {
        let file = write_config(".json", r#"{"code": "surface", "baseline": true}"#);
        let config = SweepConfig::from_file(file.path()).unwrap();
        assert_eq!(config.code, CodeKind::Surface);
        assert!(config.baseline);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let file = write_config(".yaml", "ps: []\n");
        assert!(SweepConfig::from_file(file.path()).is_err());

        let file = write_config(".toml", "code = 'shor'\n");
        assert!(SweepConfig::from_file(file.path()).is_err());
    }
}

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use std::path::PathBuf;

    use clap::{Args, Parser, Subcommand};
    use qeclab_codes::{CodeKind, LogicalBit};

    #[derive(Parser)]
    #[command(name = "qeclab")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Sweep(SweepArgs),
        Baseline(BaselineArgs),
        Active(ActiveArgs),
        Codes,
        Engines,
        Version,
    }

    #[derive(Args)]
    struct SweepArgs {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        code: Option<CodeKind>,
        #[arg(short, long)]
        noise: Option<String>,
        #[arg(long, value_delimiter = ',')]
        ps: Option<Vec<f64>>,
        #[arg(short, long)]
        shots: Option<u32>,
        #[arg(short, long)]
        logical: Option<LogicalBit>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        engine: Option<String>,
        #[arg(long)]
        baseline: bool,
        #[arg(short, long, default_value = "table")]
        format: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    }

    #[derive(Args)]
    struct BaselineArgs {
        #[arg(short, long, default_value = "bit_flip")]
        noise: String,
        #[arg(long, value_delimiter = ',', default_values_t = [0.001, 0.005, 0.01, 0.02, 0.05])]
        ps: Vec<f64>,
        #[arg(short, long, default_value_t = 4096)]
        shots: u32,
        #[arg(short, long, default_value = "0")]
        logical: LogicalBit,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, default_value = "stabilizer")]
        engine: String,
        #[arg(short, long, default_value = "table")]
        format: String,
    }

    #[derive(Args)]
    struct ActiveArgs {
        #[arg(long, default_value_t = 1, conflicts_with = "no_error")]
        error_qubit: usize,
        #[arg(long)]
        no_error: bool,
        #[arg(short, long, default_value = "0")]
        logical: LogicalBit,
        #[arg(short, long, default_value_t = 1024)]
        shots: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long, default_value = "stabilizer")]
        engine: String,
        #[arg(short, long)]
        noise: Option<String>,
        #[arg(long, default_value_t = 0.0, requires = "noise")]
        strength: f64,
        #[arg(short, long, default_value = "table")]
        format: String,
    }

    // ---- sweep ----

    #[test]
    fn test_sweep_defaults_leave_config_untouched() {
        let cli = TestCli::try_parse_from(["qeclab", "sweep"]).unwrap();
        match cli.command {
            TestCommands::Sweep(args) => {
                assert!(args.config.is_none());
                assert!(args.code.is_none());
                assert!(args.ps.is_none());
                assert!(args.shots.is_none());
                assert!(!args.baseline);
                assert_eq!(args.format, "table");
            }
            _ => panic!("Expected Sweep command"),
        }
    }

    #[test]
    fn test_sweep_all_flags() {
        let cli = TestCli::try_parse_from([
            "qeclab",
            "sweep",
            "-c",
            "sweep.yaml",
            "--code",
            "shor",
            "-n",
            "depolarizing",
            "--ps",
            "0.001,0.01,0.1",
            "-s",
            "512",
            "-l",
            "1",
            "--seed",
            "42",
            "-e",
            "statevector",
            "--baseline",
            "-f",
            "json",
            "-o",
            "report.json",
        ])
        .unwrap();

        match cli.command {
            TestCommands::Sweep(args) => {
                assert_eq!(args.config, Some(PathBuf::from("sweep.yaml")));
                assert_eq!(args.code, Some(CodeKind::Shor));
                assert_eq!(args.noise.as_deref(), Some("depolarizing"));
                assert_eq!(args.ps, Some(vec![0.001, 0.01, 0.1]));
                assert_eq!(args.shots, Some(512));
                assert_eq!(args.logical, Some(LogicalBit::One));
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.engine.as_deref(), Some("statevector"));
                assert!(args.baseline);
                assert_eq!(args.format, "json");
                assert_eq!(args.output, Some(PathBuf::from("report.json")));
            }
            _ => panic!("Expected Sweep command"),
        }
    }

    #[test]
    fn test_sweep_rejects_unknown_code() {
        assert!(TestCli::try_parse_from(["qeclab", "sweep", "--code", "toric"]).is_err());
    }

    #[test]
    fn test_sweep_rejects_bad_logical_and_strength() {
        assert!(TestCli::try_parse_from(["qeclab", "sweep", "-l", "2"]).is_err());
        assert!(TestCli::try_parse_from(["qeclab", "sweep", "--ps", "0.1,lots"]).is_err());
    }

    // ---- baseline ----

    #[test]
    fn test_baseline_defaults() {
        let cli = TestCli::try_parse_from(["qeclab", "baseline"]).unwrap();
        match cli.command {
            TestCommands::Baseline(args) => {
                assert_eq!(args.noise, "bit_flip");
                assert_eq!(args.ps, vec![0.001, 0.005, 0.01, 0.02, 0.05]);
                assert_eq!(args.shots, 4096);
                assert_eq!(args.logical, LogicalBit::Zero);
                assert_eq!(args.engine, "stabilizer");
                assert!(args.seed.is_none());
                assert_eq!(args.format, "table");
            }
            _ => panic!("Expected Baseline command"),
        }
    }

    #[test]
    fn test_baseline_excited_state() {
        let cli = TestCli::try_parse_from([
            "qeclab",
            "baseline",
            "-n",
            "amplitude_damping",
            "--logical",
            "1",
            "--ps",
            "0.1,0.2",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Baseline(args) => {
                assert_eq!(args.noise, "amplitude_damping");
                assert_eq!(args.logical, LogicalBit::One);
                assert_eq!(args.ps, vec![0.1, 0.2]);
            }
            _ => panic!("Expected Baseline command"),
        }
    }

    // ---- active ----

    #[test]
    fn test_active_defaults() {
        let cli = TestCli::try_parse_from(["qeclab", "active"]).unwrap();
        match cli.command {
            TestCommands::Active(args) => {
                assert_eq!(args.error_qubit, 1);
                assert!(!args.no_error);
                assert_eq!(args.logical, LogicalBit::Zero);
                assert_eq!(args.shots, 1024);
                assert!(args.noise.is_none());
                assert_eq!(args.strength, 0.0);
            }
            _ => panic!("Expected Active command"),
        }
    }

    #[test]
    fn test_active_no_error_conflicts_with_error_qubit() {
        assert!(TestCli::try_parse_from(["qeclab", "active", "--no-error"]).is_ok());
        assert!(
            TestCli::try_parse_from(["qeclab", "active", "--no-error", "--error-qubit", "2"])
                .is_err()
        );
    }

    #[test]
    fn test_active_strength_requires_noise() {
        assert!(TestCli::try_parse_from(["qeclab", "active", "--strength", "0.1"]).is_err());

        let cli = TestCli::try_parse_from([
            "qeclab",
            "active",
            "-n",
            "bit_flip",
            "--strength",
            "0.01",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Active(args) => {
                assert_eq!(args.noise.as_deref(), Some("bit_flip"));
                assert_eq!(args.strength, 0.01);
            }
            _ => panic!("Expected Active command"),
        }
    }

    // ---- simple commands ----

    #[test]
    fn test_listing_commands() {
        let cli = TestCli::try_parse_from(["qeclab", "codes"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Codes));

        let cli = TestCli::try_parse_from(["qeclab", "engines"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Engines));

        let cli = TestCli::try_parse_from(["qeclab", "version"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_verbosity_levels() {
        for (flag, level) in [("-v", 1), ("-vv", 2), ("-vvv", 3)] {
            let cli = TestCli::try_parse_from(["qeclab", flag, "version"]).unwrap();
            assert_eq!(cli.verbose, level);
        }
        let cli = TestCli::try_parse_from(["qeclab", "codes", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(TestCli::try_parse_from(["qeclab"]).is_err());
    }
}
