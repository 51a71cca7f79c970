#![forbid(unsafe_code)]
use anyhow::Result;
use binomes::{
    export,
    scheduler::{GenerateRequest, Scheduler},
    storage::{JsonStorage, Storage},
    Config,
};
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Générateur de binômes du vendredi
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration (roster intégré si absent)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct Period {
    /// Mois de début (1-12)
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=12))]
    start: u32,
    /// Mois de fin (1-12)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=12))]
    end: u32,
    #[arg(long, default_value_t = 2025)]
    year: i32,
}

impl From<Period> for GenerateRequest {
    fn from(p: Period) -> Self {
        GenerateRequest {
            year: p.year,
            start_month: p.start,
            end_month: p.end,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer les binômes et exporter
    Generate {
        #[command(flatten)]
        period: Period,
        /// Historique texte
        #[arg(long)]
        txt: Option<String>,
        #[arg(long)]
        csv: Option<String>,
        /// Classeur Excel (feuille `Duplas`)
        #[arg(long)]
        xlsx: Option<String>,
        #[arg(long)]
        pdf: Option<String>,
        #[arg(long)]
        json: Option<String>,
    },

    /// Vérifier un planning généré (créneaux non pourvus, règles)
    Check {
        #[command(flatten)]
        period: Period,
        /// Export CSV du rapport (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Écrire la configuration intégrée dans un fichier
    Init {
        #[arg(long, default_value = "binomes.json")]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let config = match &cli.config {
        Some(path) => JsonStorage::open(path)?.load()?,
        None => Config::builtin(),
    };
    let scheduler = Scheduler::new(&config);

    let code = match cli.cmd {
        Commands::Generate {
            period,
            txt,
            csv,
            xlsx,
            pdf,
            json,
        } => {
            let schedule = scheduler.generate(period.into())?;
            for line in export::render_lines(&schedule) {
                println!("{line}");
            }
            if let Some(path) = txt {
                export::export_text(path, &schedule)?;
            }
            if let Some(path) = csv {
                export::export_csv(path, &schedule)?;
            }
            if let Some(path) = xlsx {
                export::export_xlsx(path, &schedule)?;
            }
            if let Some(path) = pdf {
                export::export_pdf(path, &schedule)?;
            }
            if let Some(path) = json {
                export::export_json(path, &schedule)?;
            }
            0
        }
        Commands::Check { period, report } => {
            let schedule = scheduler.generate(period.into())?;
            let unresolved = schedule.unresolved_slots();
            let violations = scheduler.audit(&schedule);

            if unresolved.is_empty() && violations.is_empty() {
                println!("OK: {} slot(s), all resolved", schedule.len());
                0
            } else {
                eprintln!(
                    "Found {} unresolved slot(s), {} violation(s)",
                    unresolved.len(),
                    violations.len()
                );
                if let Some(path) = report {
                    export::export_report(path, &unresolved, &violations)?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Init { out } => {
            JsonStorage::open(&out)?.save(&config)?;
            println!("configuration written to {out}");
            0
        }
    };

    std::process::exit(code);
}
