//! Tests for the toast queue.

use std::time::Duration;

use tokio::time::sleep;

use switchboard::error::ControlError;
use switchboard::widgets::{Toast, ToastConfig, ToastLevel, Toaster};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn test_toast_expires_after_default_duration() {
    let toaster = Toaster::default();
    toaster.push(Toast::new("Saved").level(ToastLevel::Success)).unwrap();
    assert_eq!(toaster.len(), 1);

    sleep(ms(4900)).await;
    assert_eq!(toaster.len(), 1);
    sleep(ms(200)).await;
    assert!(toaster.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_toasts_keep_push_order() {
    let toaster = Toaster::new(ToastConfig::new().default_duration(ms(1000)));
    toaster.push(Toast::new("first")).unwrap();
    toaster.push(Toast::new("second").duration(ms(3000))).unwrap();
    toaster.push(Toast::new("third").title("Heads up")).unwrap();

    let messages: Vec<String> = toaster.toasts().into_iter().map(|t| t.message).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);

    sleep(ms(1500)).await;
    let messages: Vec<String> = toaster.toasts().into_iter().map(|t| t.message).collect();
    assert_eq!(messages, vec!["second"]);
}

#[tokio::test(start_paused = true)]
async fn test_sticky_toast_stays() {
    let toaster = Toaster::default();
    let id = toaster.push(Toast::new("Offline").sticky()).unwrap();
    sleep(ms(60_000)).await;
    assert_eq!(toaster.len(), 1);
    assert!(toaster.dismiss(id).unwrap());
    assert!(!toaster.dismiss(id).unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_before_expiry() {
    let toaster = Toaster::default();
    let first = toaster.push(Toast::new("a")).unwrap();
    toaster.push(Toast::new("b")).unwrap();
    toaster.dismiss(first).unwrap();
    assert_eq!(toaster.len(), 1);
    sleep(ms(6000)).await;
    assert!(toaster.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_repush_restarts_timer() {
    let toaster = Toaster::new(ToastConfig::new().default_duration(ms(1000)));
    let toast = Toast::new("retrying");
    toaster.push(toast.clone()).unwrap();
    sleep(ms(800)).await;
    toaster.push(toast).unwrap();
    assert_eq!(toaster.len(), 1);

    sleep(ms(500)).await;
    assert_eq!(toaster.len(), 1);
    sleep(ms(600)).await;
    assert!(toaster.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_expiry() {
    let toaster = Toaster::default();
    toaster.push(Toast::new("a")).unwrap();
    toaster.clear().unwrap();
    assert!(toaster.is_empty());

    toaster.push(Toast::new("b")).unwrap();
    toaster.unmount();
    sleep(ms(6000)).await;
    assert_eq!(toaster.len(), 1);
    assert_eq!(
        toaster.push(Toast::new("c")),
        Err(ControlError::Unmounted { control: "Toaster" })
    );
}

#[test]
fn test_push_requires_runtime() {
    let toaster = Toaster::default();
    assert_eq!(toaster.push(Toast::new("a")), Err(ControlError::NoRuntime));
    assert!(toaster.is_empty());
    assert!(toaster.push(Toast::new("sticky").sticky()).is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_failed_repush_keeps_original_expiry() {
    let toaster = Toaster::new(ToastConfig::new().default_duration(ms(1000)));
    let toast = Toast::new("syncing");
    toaster.push(toast.clone()).unwrap();

    let other = toaster.clone();
    let result = std::thread::spawn(move || other.push(toast)).join().unwrap();
    assert_eq!(result, Err(ControlError::NoRuntime));

    sleep(ms(1100)).await;
    assert!(toaster.is_empty());
}
