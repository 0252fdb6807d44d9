use anyhow::{Context, Result};
use censoclean::clean::{clean_all, CleanJob, OutputPolicy, ReadOptions};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// One census table and the columns worth keeping. The first column is the
/// sector identifier by convention, though nothing enforces that.
struct TableSpec {
    name: &'static str,
    file_name: &'static str,
    columns: &'static [&'static str],
}

const TABLES: &[TableSpec] = &[
    TableSpec {
        name: "DOMICILIO 1",
        file_name: "Agregados_por_setores_caracteristicas_domicilio1_BR.csv",
        columns: &["CD_setor", "V00047", "V00048", "V00049", "V00050"],
    },
    TableSpec {
        name: "DOMICILIO 2",
        file_name: "Agregados_por_setores_caracteristicas_domicilio2_BR.csv",
        columns: &["CD_setor", "V00111", "V00201", "V00238", "V00397", "V00398", "V00495"],
    },
    TableSpec {
        name: "ALFABETIZAÇÃO",
        file_name: "Agregados_por_setores_alfabetizacao_BR.csv",
        columns: &["CD_setor", "V00853", "V00855", "V00857"],
    },
    TableSpec {
        name: "COR OU RAÇA",
        file_name: "Agregados_por_setores_cor_ou_raca_BR.csv",
        columns: &["CD_SETOR", "V01317", "V01318", "V01319", "V01320", "V01321"],
    },
    TableSpec {
        name: "ÓBITOS",
        file_name: "Agregados_por_setores_obitos_BR.csv",
        columns: &["CD_SETOR", "V01224"],
    },
    TableSpec {
        name: "DEMOGRAFIA",
        file_name: "Agregados_por_setores_demografia_BR.csv",
        columns: &["CD_setor", "V01006", "V01007", "V01008"],
    },
];

#[derive(Parser)]
#[command(about = "Filter the curated censo tables down to their columns of interest")]
struct Args {
    /// Directory the table files are read from and written back to
    #[arg(long, default_value = "data/ibge/censo2022")]
    input: String,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let cwd = std::env::current_dir().context("resolving working directory")?;
    info!("table root: {}", cwd.join(&args.input).display());

    // ─── 2) queue the curated tables ─────────────────────────────────
    let input_root = std::path::PathBuf::from(&args.input);
    let jobs: Vec<CleanJob> = TABLES
        .iter()
        .map(|table| {
            info!("queueing {} ({})", table.name, table.file_name);
            CleanJob {
                input: input_root.join(table.file_name),
                options: ReadOptions::censo(
                    table.columns.iter().map(|c| c.to_string()).collect(),
                ),
                policy: OutputPolicy::filter_suffix(),
            }
        })
        .collect();

    // ─── 3) clean each table, in order ───────────────────────────────
    let outcomes = clean_all(jobs);

    // ─── 4) summarize ────────────────────────────────────────────────
    let processed = outcomes.iter().filter(|o| o.result.is_ok()).count();
    let failed = outcomes.len() - processed;
    info!("done: {} filtered, {} failed", processed, failed);
    Ok(())
}
