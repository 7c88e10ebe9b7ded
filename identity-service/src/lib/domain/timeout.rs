use std::future::Future;
use std::time::Duration;

/// Run a store call under a deadline.
///
/// On expiry the call is dropped and `timed_out` builds the caller's error
/// from a description of what ran out of time.
pub async fn bounded<T, E, F>(
    limit: Duration,
    operation: &'static str,
    future: F,
    timed_out: impl FnOnce(String) -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Store call timed out"
            );
            Err(timed_out(format!(
                "{} timed out after {}ms",
                operation,
                limit.as_millis()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result: Result<u8, String> =
            bounded(Duration::from_secs(1), "fast", async { Ok(7) }, |m| m).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_times_out() {
        let result: Result<u8, String> = bounded(
            Duration::from_millis(10),
            "slow",
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(7)
            },
            |m| m,
        )
        .await;
        assert_eq!(result, Err("slow timed out after 10ms".to_string()));
    }
}
