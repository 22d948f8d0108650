// Entry point and menu flow.
//
// - Option [1] loads the plan export and the historical archive, printing
//   diagnostics.
// - Option [2] builds the dashboard, writes one CSV per report plus a JSON
//   dashboard, and previews each report on the console.
// - After generating reports, the user can go back to the menu or exit.
use action_plan_report::config::Cli;
use action_plan_report::dashboard::{build_dashboard, DashboardRequest};
use action_plan_report::loader::{CsvHistoricalSource, CsvPlanSource};
use action_plan_report::output;
use action_plan_report::types::{Dashboard, Dimension, Granularity, ReferenceDate};
use action_plan_report::util::format_int;
use clap::Parser;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Loaded inputs are kept for the whole run so reports can be regenerated
// without re-reading the files.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState::default()));

#[derive(Default)]
struct AppState {
    plans: Option<CsvPlanSource>,
    historical: CsvHistoricalSource,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Report Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn handle_load(cli: &Cli) {
    let plans = match CsvPlanSource::load(&cli.plans) {
        Ok((source, report)) => {
            println!(
                "Processing action plans... ({} rows read, {} loaded)",
                format_int(report.total_rows),
                format_int(report.loaded_rows)
            );
            if report.parse_errors > 0 {
                println!("Note: {} rows skipped due to parse errors.", format_int(report.parse_errors));
            }
            source
        }
        Err(e) => {
            error!(path = %cli.plans.display(), error = %e, "failed to load action plans");
            println!("Failed to load {}: {}\n", cli.plans.display(), e);
            return;
        }
    };

    // The archive only feeds the benchmark fallback, so a missing file is not fatal.
    let historical = match CsvHistoricalSource::load(&cli.historical) {
        Ok((source, report)) => {
            println!(
                "Processing historical stats... ({} rows read, {} loaded)",
                format_int(report.total_rows),
                format_int(report.loaded_rows)
            );
            source
        }
        Err(e) => {
            warn!(path = %cli.historical.display(), error = %e, "historical stats unavailable");
            CsvHistoricalSource::default()
        }
    };
    println!();

    let mut state = APP_STATE.lock().unwrap_or_else(|p| p.into_inner());
    state.plans = Some(plans);
    state.historical = historical;
}

fn write_report<T: serde::Serialize>(dir: &Path, file: &str, rows: &[T]) {
    let path = dir.join(file);
    if let Err(e) = output::write_csv(&path, rows) {
        warn!(path = %path.display(), error = %e, "write failed");
    }
}

fn print_dashboard(cli: &Cli, d: &Dashboard) {
    let dir = cli.out_dir.as_path();

    println!("{} - Performance Dashboard FY {}\n", d.department_name, d.year);
    println!(
        "Total Plans: {} | Completion Rate: {}% ({}) | Achieved: {} | In Progress: {} | Needs Attention: {}\n",
        format_int(d.summary.total),
        d.summary.rate,
        d.rate_tier,
        format_int(d.summary.achieved),
        format_int(d.summary.in_progress),
        format_int(d.needs_attention)
    );
    if d.summary.total == 0 {
        if d.plans_in_other_years > 0 {
            println!(
                "No action plans for {}. Try a different year; there are {} plans in other years.\n",
                d.year,
                format_int(d.plans_in_other_years)
            );
        } else {
            println!("No action plans for {}.\n", d.year);
        }
    }

    let breakdown = output::bucket_rows(&d.breakdown);
    write_report(dir, "report1_breakdown.csv", &breakdown);
    match d.breakdown_dimension {
        Dimension::Strategy => println!("Report 1: Performance by Strategy ({} strategies tracked)\n", breakdown.len()),
        Dimension::ResponsibleParty => println!("Report 1: Performance by PIC ({} team members)\n", breakdown.len()),
    }
    output::preview_table_rows(&breakdown, 5);

    let title = match d.granularity {
        Granularity::Monthly => "Monthly Progress",
        Granularity::Quarterly => "Quarterly Progress",
    };
    match (&d.benchmark, d.comparison_year) {
        (Some(points), Some(year)) => {
            let rows = output::benchmark_rows(points);
            write_report(dir, "report2_benchmark.csv", &rows);
            println!("Report 2: {} ({} vs {})\n", title, d.year, year);
            if !d.has_comparison_data {
                println!("No data available for {}. Comparison values will be empty.\n", year);
            }
            output::preview_table_rows(&rows, 12);
        }
        _ => {
            let rows = output::bucket_rows(&d.timeline);
            write_report(dir, "report2_timeline.csv", &rows);
            println!("Report 2: {}\n", title);
            output::preview_table_rows(&rows, 12);
        }
    }

    let distribution = output::distribution_rows(&d.distribution);
    write_report(dir, "report3_strategy_distribution.csv", &distribution);
    println!("Report 3: Strategic Focus Distribution\n");
    output::preview_table_rows(&distribution, 6);

    let bottlenecks = output::bottleneck_rows(&d.bottlenecks);
    write_report(dir, "report4_bottlenecks.csv", &bottlenecks);
    println!("Report 4: Bottleneck Radar\n");
    if bottlenecks.is_empty() {
        println!("No Bottlenecks Detected. All departments are on track.\n");
    } else {
        let total: usize = d.bottlenecks.iter().map(|b| b.overdue).sum();
        println!("{} overdue items across {} departments\n", format_int(total), bottlenecks.len());
        output::preview_table_rows(&bottlenecks, 5);
    }

    let json = dir.join("dashboard.json");
    if let Err(e) = output::write_json(&json, d) {
        warn!(path = %json.display(), error = %e, "write failed");
    }
    println!("(Full tables exported to {})\n", dir.display());
}

fn handle_generate_reports(cli: &Cli, reference: ReferenceDate) {
    let state = APP_STATE.lock().unwrap_or_else(|p| p.into_inner());
    let Some(plans) = state.plans.as_ref() else {
        println!("Error: No data loaded. Please load the files first (option 1).\n");
        return;
    };

    let request = DashboardRequest {
        department: cli.department.clone(),
        year: cli.year.unwrap_or(reference.year),
        reference,
        dimension: cli.breakdown,
        granularity: cli.granularity,
        comparison: cli.compare,
    };
    match build_dashboard(&request, plans, &state.historical) {
        Ok(d) => print_dashboard(cli, &d),
        Err(e) => error!(error = %e, "failed to build dashboard"),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let reference = match cli.reference_date() {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "invalid reference date");
            std::process::exit(2);
        }
    };

    loop {
        println!("Action Plan Reports:");
        println!("[1] Load the files");
        println!("[2] Generate Reports\n");
        match read_choice().as_str() {
            "1" => handle_load(&cli),
            "2" => {
                println!();
                handle_generate_reports(&cli, reference);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => println!("Invalid choice. Please enter 1 or 2.\n"),
        }
    }
}
