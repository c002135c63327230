use infraguard_state::aws::s3::{Bucket, PublicAccessBlock};
use infraguard_state::{BoolValue, HasMetadata, Metadata, State, StringValue};

/// Where a finding about `value` should point.
///
/// Unset values usually carry no source declaration, so attribution falls back to the closest
/// enclosing node that has one. `enclosing` is ordered innermost first (block, then resource).
pub(crate) fn locate<'a>(
    value: &'a BoolValue,
    enclosing: &[&'a dyn HasMetadata],
) -> &'a Metadata {
    let own = value.metadata();
    if own.is_managed() {
        return own;
    }
    enclosing
        .iter()
        .copied()
        .map(|node| node.metadata())
        .find(|m| m.is_managed())
        .unwrap_or(own)
}

/// Human label for a resource: its reference, else its declared name.
pub(crate) fn label<'a>(resource: &'a Metadata, name: &'a StringValue) -> &'a str {
    match resource.effective_reference() {
        "" if !name.is_empty() => name.as_str(),
        "" => "<unnamed>",
        reference => reference,
    }
}

/// Every public access block in the state with the bucket it is declared on, if any.
///
/// Standalone blocks come first, then blocks declared inline on buckets, each in source order.
pub(crate) fn access_blocks(
    state: &State,
) -> impl Iterator<Item = (&PublicAccessBlock, Option<&Bucket>)> {
    let s3 = &state.aws.s3;
    s3.public_access_blocks
        .iter()
        .map(|block| (block, None))
        .chain(s3.buckets.iter().filter_map(|bucket| {
            bucket
                .public_access_block
                .as_ref()
                .map(|block| (block, Some(bucket)))
        }))
}

/// Label for an access block: its own reference, else the owning bucket's.
pub(crate) fn block_label<'a>(block: &'a PublicAccessBlock, owner: Option<&'a Bucket>) -> &'a str {
    match (block.metadata.effective_reference(), owner) {
        ("", Some(bucket)) => label(&bucket.metadata, &bucket.name),
        _ => label(&block.metadata, &block.bucket),
    }
}

/// Attribution for a flag on an access block.
pub(crate) fn locate_block_flag<'a>(
    flag: &'a BoolValue,
    block: &'a PublicAccessBlock,
    owner: Option<&'a Bucket>,
) -> &'a Metadata {
    match owner {
        Some(bucket) => locate(flag, &[block, bucket]),
        None => locate(flag, &[block]),
    }
}
