use polars::prelude::*;

/// Turns a long frame (one row per key and `on` value) into a wide frame with one column
/// per distinct `on` value, holding the matching `values`.
///
/// Distinct values become columns in sorted order; the row key is `index`, in order of
/// first appearance. Duplicate keys keep the first value, absent combinations are null.
pub fn pivot_long(
    frame: LazyFrame,
    index: &[&str],
    on: &str,
    values: &str,
) -> PolarsResult<LazyFrame> {
    let frame = frame.with_column(col(on).cast(DataType::String));
    let distinct = frame
        .clone()
        .select([col(on).unique().drop_nulls()])
        .collect()?;
    let mut names: Vec<String> = distinct
        .column(on)?
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();
    names.sort();

    let columns: Vec<Expr> = names
        .iter()
        .map(|name| {
            col(values)
                .filter(col(on).eq(lit(name.as_str())))
                .first()
                .alias(name.as_str())
        })
        .collect();
    let keys: Vec<Expr> = index.iter().map(|c| col(*c)).collect();

    Ok(frame.group_by_stable(keys).agg(columns))
}
