//! CLI binary for the HJRS client.
//!
//! Usage: hjrs search --category X --min-jpi 50 --limit 10

#[cfg(feature = "cli")]
mod cli {
    use clap::{Parser, Subcommand};
    use hjrs_client::analysis::{
        countries_with_category, top_countries, CategorySummary, CountrySummary,
        DEFAULT_CATEGORY_LETTER, DEFAULT_TOP_COUNTRIES,
    };
    use hjrs_client::prediction::{group_distinct, history_for};
    use hjrs_client::pagination::{check_page, showing_range};
    use hjrs_client::{
        CatalogClient, ClientConfig, FilterDimension, HjrsError, Journal, Layout, LookupKind,
        PageSize, ScalarBound, SearchScreen, Sort, SortField, SortOrder,
    };

    #[derive(Parser)]
    #[command(name = "hjrs", about = "HEC Journal Recognition System client", version)]
    struct Cli {
        /// API base URL (overrides HJRS_API_URL env var)
        #[arg(long, global = true)]
        base_url: Option<String>,

        /// Output format
        #[arg(long, global = true, default_value = "table")]
        output: OutputFormat,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Clone, Copy, clap::ValueEnum)]
    enum OutputFormat {
        Table,
        Json,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Look a journal up by title, ISSN, or e-ISSN
        Lookup {
            /// Search term
            query: String,
            /// Field to match (title, issn, eissn)
            #[arg(short = 't', long = "type", default_value = "title")]
            kind: String,
            /// Also print each journal's JPI history
            #[arg(long)]
            history: bool,
        },
        /// Advanced search with filters (ids or labels, repeatable)
        Search {
            #[arg(long)]
            country: Vec<String>,
            #[arg(long)]
            year: Vec<String>,
            #[arg(long)]
            category: Vec<String>,
            #[arg(long)]
            subject_area: Vec<String>,
            #[arg(long)]
            subcategory: Vec<String>,
            #[arg(long)]
            publisher: Vec<String>,
            /// Lowest JPI (0-100)
            #[arg(long)]
            min_jpi: Option<f64>,
            /// Highest JPI (0-100)
            #[arg(long)]
            max_jpi: Option<f64>,
            /// Page to show
            #[arg(short, long, default_value = "1")]
            page: u32,
            /// Results per page (10, 25, 50, 100)
            #[arg(short, long, default_value = "25")]
            limit: u32,
            /// Sort order (e.g., "jpi desc", "year asc")
            #[arg(short, long)]
            sort: Option<String>,
        },
        /// List the options of a filter dimension
        Options {
            /// country, year, category, subject-area, subcategory, publisher
            dimension: String,
        },
        /// Predict next-year performance for a journal
        Predict {
            #[arg(long)]
            title: String,
            #[arg(long)]
            subject_area: String,
        },
        /// Journal distribution analysis
        Analysis {
            #[command(subcommand)]
            view: AnalysisView,
        },
    }

    #[derive(Subcommand)]
    enum AnalysisView {
        /// Journals per country
        Country {
            #[arg(long)]
            year: Option<String>,
            #[arg(long)]
            category: Option<String>,
            /// Countries shown, largest first
            #[arg(long, default_value_t = DEFAULT_TOP_COUNTRIES)]
            top: usize,
            /// Category letter counted in the summary
            #[arg(long, default_value = DEFAULT_CATEGORY_LETTER)]
            letter: String,
        },
        /// Journals per category
        Category {
            #[arg(long)]
            year: Option<String>,
            #[arg(long)]
            country: Option<String>,
        },
        /// Category counts per publishing year
        Years {
            #[arg(long)]
            country: Option<String>,
        },
    }

    fn init_logging() {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    fn make_client(base_url: Option<String>) -> hjrs_client::error::Result<CatalogClient> {
        let mut config = ClientConfig::from_env()?;
        if let Some(url) = base_url {
            config = config.with_base_url(url)?;
        }
        CatalogClient::from_config(config)
    }

    fn parse_sort(s: &str) -> hjrs_client::error::Result<Sort> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let field = parts
            .first()
            .and_then(|f| SortField::from_str_loose(f))
            .ok_or_else(|| HjrsError::InvalidQuery(format!("Unknown sort field: {}", s)))?;
        let order = match parts.get(1) {
            Some(o) => SortOrder::from_str_loose(o)
                .ok_or_else(|| HjrsError::InvalidQuery(format!("Unknown sort order: {}", o)))?,
            None => SortOrder::Desc,
        };
        Ok(Sort::new(field, order))
    }

    fn truncate(s: &str, max: usize) -> String {
        if s.chars().count() > max {
            let cut: String = s.chars().take(max - 3).collect();
            format!("{}...", cut)
        } else {
            s.to_string()
        }
    }

    fn print_journals_table(journals: &[Journal]) {
        use comfy_table::{ContentArrangement, Table};

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            "Title", "ISSN", "Category", "JPI", "Subject Area", "Country", "Year", "Publisher",
        ]);

        for journal in journals {
            let jpi = journal
                .jpi()
                .map(|j| j.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            table.add_row(vec![
                truncate(journal.title().unwrap_or("-"), 50),
                journal.issn().unwrap_or("N/A").to_string(),
                journal.category().unwrap_or("-").to_string(),
                jpi,
                truncate(journal.subject_area().unwrap_or("-"), 30),
                journal.country().unwrap_or("-").to_string(),
                journal.year_range().unwrap_or("-").to_string(),
                truncate(journal.publisher().unwrap_or("-"), 30),
            ]);
        }

        println!("{table}");
    }

    fn print_history_table(journal: &Journal, rows: &[Journal]) {
        use comfy_table::{ContentArrangement, Table};

        println!();
        println!("{}", journal.title().unwrap_or("-"));
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Year", "JPI", "Category", "Publisher", "Country"]);
        for record in history_for(journal, rows) {
            table.add_row(vec![
                record.year,
                record.jpi.to_string(),
                record.category.unwrap_or_else(|| "-".to_string()),
                record.publisher.unwrap_or_else(|| "-".to_string()),
                record.country.unwrap_or_else(|| "-".to_string()),
            ]);
        }
        println!("{table}");
    }

    fn print_json<T: serde::Serialize>(value: &T) -> hjrs_client::error::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub async fn run() -> hjrs_client::error::Result<()> {
        init_logging();
        let cli = Cli::parse();
        let client = make_client(cli.base_url)?;

        match cli.command {
            Commands::Lookup {
                query,
                kind,
                history,
            } => {
                let kind = LookupKind::from_str_loose(&kind)
                    .ok_or_else(|| HjrsError::InvalidQuery(format!("Unknown lookup type: {}", kind)))?;
                let rows = client.lookup(kind, &query).await?;
                let journals = group_distinct(&rows);
                match cli.output {
                    OutputFormat::Json if history => {
                        let entries: Vec<_> = journals
                            .iter()
                            .map(|j| {
                                serde_json::json!({
                                    "journal": j,
                                    "history": history_for(j, &rows),
                                })
                            })
                            .collect();
                        print_json(&entries)?
                    }
                    OutputFormat::Json => print_json(&journals)?,
                    OutputFormat::Table if journals.is_empty() => {
                        println!("{}", hjrs_client::parse::NO_RESULTS_MESSAGE);
                    }
                    OutputFormat::Table => {
                        print_journals_table(&journals);
                        if history {
                            for journal in &journals {
                                print_history_table(journal, &rows);
                            }
                        }
                    }
                }
            }

            Commands::Search {
                country,
                year,
                category,
                subject_area,
                subcategory,
                publisher,
                min_jpi,
                max_jpi,
                page,
                limit,
                sort,
            } => {
                let page_size = PageSize::from_u32(limit).ok_or_else(|| {
                    HjrsError::InvalidQuery(format!("Limit must be 10, 25, 50, or 100 (got {})", limit))
                })?;
                let sort = sort.as_deref().map(parse_sort).transpose()?;

                let mut screen = SearchScreen::open(client).await;
                // sort and page size first so neither triggers a search on its own
                screen.set_sort(sort);
                screen.set_page_size(page_size);

                for (dimension, values) in [
                    (FilterDimension::Country, country),
                    (FilterDimension::Year, year),
                    (FilterDimension::Category, category),
                    (FilterDimension::SubjectArea, subject_area),
                    (FilterDimension::SubjectSubcategory, subcategory),
                    (FilterDimension::Publisher, publisher),
                ] {
                    for value in values {
                        let id = match screen.reference().resolve(dimension, &value) {
                            Some(option) => option.id.clone(),
                            None => value,
                        };
                        if !screen.state().filters.is_selected(dimension, &id) {
                            screen.toggle(dimension, id);
                        }
                    }
                }
                for (bound, value) in [(ScalarBound::MinJpi, min_jpi), (ScalarBound::MaxJpi, max_jpi)] {
                    screen.set_bound(bound, value);
                    if screen.state().filters.scalar(bound) != value {
                        return Err(HjrsError::InvalidQuery(
                            "JPI bounds must be within 0-100 with min <= max".to_string(),
                        ));
                    }
                }

                if !screen.state().can_search() {
                    return Err(HjrsError::InvalidQuery(
                        "Select at least one filter to search".to_string(),
                    ));
                }
                screen.search();
                screen.settle().await;
                check_page(page, screen.state().page_count())?;
                if page > 1 {
                    screen.go_to(page);
                    screen.settle().await;
                }

                let state = screen.state();
                match cli.output {
                    OutputFormat::Json => print_json(&state.result)?,
                    OutputFormat::Table => {
                        if let Some(message) = state.error_message() {
                            println!("{}", message);
                        }
                        if !state.result.items.is_empty() {
                            let (first, last) = showing_range(
                                state.current_page,
                                state.page_size.get(),
                                state.result.total_count,
                            );
                            println!(
                                "Showing {} to {} of {} results",
                                first, last, state.result.total_count
                            );
                            print_journals_table(&state.result.items);
                            let links: Vec<String> = state
                                .page_links(Layout::Desktop)
                                .iter()
                                .map(|slot| match slot {
                                    hjrs_client::PageSlot::Page(n) if *n == state.current_page => {
                                        format!("[{}]", n)
                                    }
                                    other => other.to_string(),
                                })
                                .collect();
                            if !links.is_empty() {
                                println!("Pages: {}", links.join(" "));
                            }
                        }
                    }
                }
            }

            Commands::Options { dimension } => {
                let dim = FilterDimension::from_str_loose(&dimension).ok_or_else(|| {
                    HjrsError::InvalidQuery(format!("Unknown filter dimension: {}", dimension))
                })?;
                let options = client.reference_options(dim).await?;
                match cli.output {
                    OutputFormat::Json => print_json(&options)?,
                    OutputFormat::Table => {
                        use comfy_table::{ContentArrangement, Table};
                        let mut table = Table::new();
                        table.set_content_arrangement(ContentArrangement::Dynamic);
                        table.set_header(vec!["ID", dim.label()]);
                        for option in &options {
                            table.add_row(vec![&option.id, &option.label]);
                        }
                        println!("{table}");
                    }
                }
            }

            Commands::Predict {
                title,
                subject_area,
            } => {
                let prediction = match client.predict_performance(&title, &subject_area).await {
                    Ok(p) => p,
                    Err(e) => {
                        eprintln!("{}", hjrs_client::prediction::prediction_error_message(&e));
                        std::process::exit(1);
                    }
                };
                match cli.output {
                    OutputFormat::Json => print_json(&prediction)?,
                    OutputFormat::Table => {
                        let heading = match &prediction.predicted_year {
                            Some(year) => format!("Predicted Performance for {}", year),
                            None => "Predicted Performance".to_string(),
                        };
                        println!("{}", heading);
                        println!(
                            "  JPI:        {}",
                            prediction
                                .predicted_jpi
                                .map(|j| j.to_string())
                                .unwrap_or_else(|| "N/A".to_string())
                        );
                        println!(
                            "  Category:   {}",
                            prediction.predicted_category.as_deref().unwrap_or("N/A")
                        );
                        println!(
                            "  Confidence: {}",
                            prediction.confidence_percent().unwrap_or_else(|| "N/A".to_string())
                        );
                        if let Some(explanation) = &prediction.explanation {
                            println!();
                            println!("{}", explanation);
                        }
                    }
                }
            }

            Commands::Analysis { view } => match view {
                AnalysisView::Country {
                    year,
                    category,
                    top,
                    letter,
                } => {
                    let rows = client
                        .country_distribution(year.as_deref(), category.as_deref())
                        .await?;
                    let summary = CountrySummary::from_rows(&rows);
                    let with_category = countries_with_category(&rows, &letter);
                    match cli.output {
                        OutputFormat::Json => print_json(&serde_json::json!({
                            "rows": rows,
                            "top": top_countries(&rows, top),
                            "summary": summary,
                            "countries_with_category": with_category,
                        }))?,
                        OutputFormat::Table => {
                            use comfy_table::{ContentArrangement, Table};
                            let mut table = Table::new();
                            table.set_content_arrangement(ContentArrangement::Dynamic);
                            table.set_header(vec!["Country", "Journals"]);
                            for row in top_countries(&rows, top) {
                                table.add_row(vec![
                                    row.country_name.clone(),
                                    row.journal_count.unwrap_or(0).to_string(),
                                ]);
                            }
                            println!("{table}");
                            println!("Total countries: {}", summary.total_countries);
                            if let Some((name, count)) = &summary.top_country {
                                println!("Top country: {} ({} journals)", name, count);
                            }
                            println!("Average journals per country: {}", summary.average_display());
                            println!(
                                "Countries with category {}: {}",
                                letter.to_ascii_uppercase(),
                                with_category
                            );
                        }
                    }
                }
                AnalysisView::Category { year, country } => {
                    let (categories, countries) = tokio::join!(
                        client.category_distribution(year.as_deref(), country.as_deref()),
                        client.country_distribution(year.as_deref(), None),
                    );
                    let categories = categories?;
                    // the overall row only needs the country count
                    let countries = countries.unwrap_or_default();
                    let summary = CategorySummary::from_rows(&categories, &countries);
                    match cli.output {
                        OutputFormat::Json => print_json(&summary)?,
                        OutputFormat::Table => {
                            use comfy_table::{ContentArrangement, Table};
                            let mut table = Table::new();
                            table.set_content_arrangement(ContentArrangement::Dynamic);
                            table.set_header(vec!["Category", "Journals", "Share", "Avg JPI", "Countries"]);
                            for share in summary.categories.iter().chain(std::iter::once(&summary.overall)) {
                                table.add_row(vec![
                                    share.category_letter.clone(),
                                    share.journal_count.to_string(),
                                    format!("{:.1}%", share.percentage),
                                    share
                                        .average_jpi
                                        .map(|j| format!("{:.2}", j))
                                        .unwrap_or_else(|| "-".to_string()),
                                    share
                                        .countries_count
                                        .map(|c| c.to_string())
                                        .unwrap_or_else(|| "-".to_string()),
                                ]);
                            }
                            println!("{table}");
                        }
                    }
                }
                AnalysisView::Years { country } => {
                    let rows = client.publishing_year_distribution(country.as_deref()).await?;
                    match cli.output {
                        OutputFormat::Json => print_json(&rows)?,
                        OutputFormat::Table => {
                            use comfy_table::{ContentArrangement, Table};
                            let mut table = Table::new();
                            table.set_content_arrangement(ContentArrangement::Dynamic);
                            table.set_header(vec!["Year", "X", "Y", "W"]);
                            for row in &rows {
                                table.add_row(vec![
                                    row.year.clone().unwrap_or_default(),
                                    row.category_x_count.unwrap_or(0).to_string(),
                                    row.category_y_count.unwrap_or(0).to_string(),
                                    row.category_w_count.unwrap_or(0).to_string(),
                                ]);
                            }
                            println!("{table}");
                        }
                    }
                }
            },
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary requires the 'cli' feature. Build with: cargo build --features cli");
    std::process::exit(1);
}
