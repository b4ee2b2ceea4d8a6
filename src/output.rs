// src/output.rs

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Date32Array, Float64Array, StringArray},
    datatypes::{DataType, Date32Type, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::Local;
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;

use crate::config::Format;
use crate::observation::{Observation, COLUMNS};

/// File stem of every exported table.
const FILE_STEM: &str = "precios_promedio";

/// Arrow schema of the price table: Date, Region, Product, Unit, Price.
pub fn table_schema() -> Arc<Schema> {
    let [date, region, product, unit, price] = COLUMNS;
    Arc::new(Schema::new(vec![
        Field::new(date, DataType::Date32, true),
        Field::new(region, DataType::Utf8, true),
        Field::new(product, DataType::Utf8, true),
        Field::new(unit, DataType::Utf8, true),
        Field::new(price, DataType::Float64, false),
    ]))
}

/// Materialise the observations as a single record batch.
pub fn to_record_batch(rows: &[Observation]) -> Result<RecordBatch> {
    let dates: Date32Array = rows
        .iter()
        .map(|o| o.date.map(Date32Type::from_naive_date))
        .collect();
    let regions: StringArray = rows.iter().map(|o| o.region.as_deref()).collect();
    let products: StringArray = rows.iter().map(|o| o.product.as_deref()).collect();
    let units: StringArray = rows.iter().map(|o| o.unit.as_deref()).collect();
    let prices: Float64Array = rows.iter().map(|o| Some(o.price)).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(dates),
        Arc::new(regions),
        Arc::new(products),
        Arc::new(units),
        Arc::new(prices),
    ];
    RecordBatch::try_new(table_schema(), columns).context("building price record batch")
}

/// Write the table as one SNAPPY-compressed Parquet file.
pub fn write_parquet(rows: &[Observation], path: &Path) -> Result<()> {
    let batch = to_record_batch(rows)?;
    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("creating Arrow writer")?;
    writer.write(&batch).context("writing price batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// Write the table as a pretty-printed JSON array.
pub fn write_json(rows: &[Observation], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {:?}", path))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, rows).context("serializing observations")?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

/// Write one `precios_promedio_<timestamp>.<ext>` per format under `dir`.
pub fn export(rows: &[Observation], dir: &Path, formats: &[Format]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {:?}", dir))?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = dir.join(format!("{}_{}.{}", FILE_STEM, stamp, format.extension()));
        match format {
            Format::Parquet => write_parquet(rows, &path)?,
            Format::Json => write_json(rows, &path)?,
        }
        info!(path = %path.display(), rows = rows.len(), "wrote table");
        written.push(path);
    }
    Ok(written)
}
