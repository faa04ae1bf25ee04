use std::{fs::File, io, path::PathBuf};

use cellar::{
    export::write_csv,
    filter::{FilterConfig, filter},
    prelude::*,
};
use clap::Parser;

use crate::cli::{CatalogArgs, FilterArgs};

#[derive(Parser)]
pub struct ExportArgs {
    #[clap(flatten)]
    catalog: CatalogArgs,

    #[clap(flatten)]
    filter: FilterArgs,

    /// Output file, standard output by default.
    #[clap(long, short)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn run(self) -> Result {
        let catalog = self.catalog.load()?;
        let batteries = filter(&catalog, &FilterConfig::from(&self.filter));
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create `{}`", path.display()))?;
                write_csv(file, &batteries)?;
                info!(path = %path.display(), n_batteries = batteries.len(), "exported");
            }
            None => write_csv(io::stdout().lock(), &batteries)?,
        }
        Ok(())
    }
}
