use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting leaders ETL process...");

        // Extract
        println!("Fetching countries and leaders...");
        let raw_data = self.pipeline.extract().await?;
        println!("Fetched leader lists for {} countries", raw_data.len());

        // Transform
        println!("Enriching leaders with intro paragraphs...");
        let enriched = self.pipeline.transform(raw_data).await?;
        let total: usize = enriched.values().map(Vec::len).sum();
        println!("Enriched {} leader(s)", total);

        // Load
        println!("Saving output...");
        let output_path = self.pipeline.load(enriched).await?;
        println!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
