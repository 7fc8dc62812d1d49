use anyhow::{Result, anyhow};
use autoscale_cuckoo_filter::CuckooFilter;
use futures_util::StreamExt;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::sync::RwLock;

/// Expected applicant volume and false-positive rate.
const FILTER_CAPACITY: usize = 100_000;
const FALSE_POSITIVE_RATE: f64 = 0.001;

/// Fast negative check for "has this email already applied?". A hit still
/// needs the authoritative DB lookup; a miss is definitive.
static APPLICANT_EMAIL_FILTER: Lazy<RwLock<CuckooFilter<String>>> =
    Lazy::new(|| RwLock::new(CuckooFilter::new(FILTER_CAPACITY, FALSE_POSITIVE_RATE)));

#[inline]
fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// False positives possible, false negatives are not.
pub fn might_have_applied(email: &str) -> bool {
    let email = normalize(email);
    APPLICANT_EMAIL_FILTER
        .read()
        .expect("applicant filter poisoned")
        .contains(&email)
}

/// Record a submitted application's email.
pub fn insert(email: &str) {
    let email = normalize(email);
    APPLICANT_EMAIL_FILTER
        .write()
        .expect("applicant filter poisoned")
        .add(&email);
}

/// Warm up the filter from persisted applications, streaming in batches.
pub async fn warmup_applicant_filter(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream =
        sqlx::query_as::<_, (String,)>("SELECT email FROM job_applications").fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total = 0usize;

    while let Some(row) = stream.next().await {
        let (email,) = row.map_err(|e| anyhow!("DB row fetch failed: {}", e))?;

        batch.push(normalize(&email));
        total += 1;

        if batch.len() == batch_size {
            insert_batch(&batch);
            batch.clear();
        }
    }

    if !batch.is_empty() {
        insert_batch(&batch);
    }

    log::info!("Applicant email filter warmup complete: {} applications", total);
    Ok(())
}

fn insert_batch(emails: &[String]) {
    let mut filter = APPLICANT_EMAIL_FILTER
        .write()
        .expect("applicant filter poisoned");

    for email in emails {
        filter.add(email);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_email_is_reported_case_insensitively() {
        insert("Applied@Mail.com");
        assert!(might_have_applied("applied@mail.com"));
        assert!(might_have_applied("APPLIED@MAIL.COM"));
    }
}
