use indexmap::IndexMap;

use crate::board::Job;

/// Upper bound on one outbound message's content length. Discord allows
/// 2000 characters; 1500 leaves headroom for markup added platform-side.
pub const MESSAGE_LIMIT: usize = 1500;

/// Section header for one location group
pub fn location_header(location: &str) -> String {
    format!("\n## {}:\n", location)
}

/// One listing line: marker, bold title, optional salary, work-mode tags,
/// and a redirect link built from the public base URL and the record id
///
/// An empty salary omits the whole ` @ ...` suffix. Records without
/// work-mode tags render the literal `Unknown`.
pub fn job_listing(public_base_url: &str, job: &Job) -> String {
    let types = match &job.location_type {
        Some(types) => types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(" | "),
        None => "Unknown".to_string(),
    };

    let salary = if job.salary.is_empty() {
        String::new()
    } else {
        format!(" @ {}", job.salary)
    };

    format!(
        ":link: **{}:**{} [{}] <{}/jobs/{}>",
        job.title, salary, types, public_base_url, job.id
    )
}

/// Group jobs by location, preserving first-seen location order and each
/// location's insertion order
pub fn group_by_location(jobs: Vec<Job>) -> IndexMap<String, Vec<Job>> {
    let mut locations: IndexMap<String, Vec<Job>> = IndexMap::new();
    for job in jobs {
        locations.entry(job.location.clone()).or_default().push(job);
    }
    locations
}

/// Greedily pack blocks into messages of at most `limit` characters
///
/// A block is never split: when appending would exceed the limit a new
/// message starts, and a block that alone exceeds the limit still goes out
/// whole (the platform may reject it, which the run summary reports).
pub fn pack_messages(blocks: Vec<String>, limit: usize) -> Vec<String> {
    let mut messages: Vec<String> = Vec::new();
    let mut current = String::new();

    for block in blocks {
        if !current.is_empty() && current.len() + block.len() > limit {
            messages.push(std::mem::take(&mut current));
        }
        current.push_str(&block);
    }

    if !current.is_empty() {
        messages.push(current);
    }
    messages
}

/// Full message pipeline for one run: group, render blocks, pack
pub fn build_messages(public_base_url: &str, jobs: Vec<Job>) -> Vec<String> {
    let blocks: Vec<String> = group_by_location(jobs)
        .iter()
        .map(|(location, jobs)| {
            let listings: Vec<String> = jobs
                .iter()
                .map(|job| job_listing(public_base_url, job))
                .collect();
            format!("{}{}", location_header(location), listings.join("\n"))
        })
        .collect();

    pack_messages(blocks, MESSAGE_LIMIT)
}
