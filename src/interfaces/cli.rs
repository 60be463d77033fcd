use clap::Parser;

#[derive(Parser)]
#[command(name = "commit-progress")]
#[command(about = "Yearly GitHub contribution progress against a target.")]
#[command(version)]
pub struct Cli {
    /// GitHub username
    pub username: Option<String>,

    /// Year to count contributions in
    pub year: Option<String>,

    /// Target contribution count
    pub target: Option<String>,

    /// Don't use cached result
    #[arg(short = 'n', long)]
    pub nocache: bool,

    /// Output as JSON
    #[arg(long, conflicts_with = "svg")]
    pub json: bool,

    /// Output an SVG badge
    #[arg(long)]
    pub svg: bool,

    /// Badge color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Run the HTTP server
    #[arg(long)]
    pub serve: bool,

    /// Address to bind the server to
    #[arg(long, short = 'H', env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short, env = "PORT")]
    pub port: Option<u16>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,
}
