use minichess::search::TimeManagement;
use minichess::time::TimeManager;

#[test]
fn test_allocate_normal() {
    let tm = TimeManagement::new();
    // 60s left, no inc, white to move
    let time = TimeManager::allocate_time(&tm, Some(60000), None, None, None, None, None, true);
    // default horizon of 20 moves
    assert_eq!(time, 3000);
}

#[test]
fn test_allocate_uses_own_clock() {
    let tm = TimeManagement::new();
    let white = TimeManager::allocate_time(&tm, Some(2000), Some(40000), None, None, None, None, true);
    let black =
        TimeManager::allocate_time(&tm, Some(2000), Some(40000), None, None, None, None, false);
    assert_eq!(white, 100);
    assert_eq!(black, 2000);
}

#[test]
fn test_allocate_increment() {
    let tm = TimeManagement::new();
    // 10s left, 1s increment
    let time =
        TimeManager::allocate_time(&tm, Some(10000), None, Some(1000), None, None, None, true);
    assert_eq!(time, 500 + 800);
    assert!(time < 10000, "Should not use all time");
}

#[test]
fn test_movestogo_is_clamped() {
    let tm = TimeManagement::new();
    let one = TimeManager::allocate_time(&tm, None, Some(6000), None, None, None, Some(1), false);
    let five = TimeManager::allocate_time(&tm, None, Some(6000), None, None, None, Some(5), false);
    assert_eq!(one, 3000, "never spends the whole clock on the last move");
    assert_eq!(five, 1200);
}

#[test]
fn test_low_clock_floor() {
    let tm = TimeManagement::new();
    let time = TimeManager::allocate_time(&tm, Some(50), None, None, None, None, None, true);
    assert_eq!(time, 10);
}

#[test]
fn test_movetime_exact() {
    let tm = TimeManagement::new();
    let time =
        TimeManager::allocate_time(&tm, Some(1000), None, None, None, Some(5000), None, true);
    assert_eq!(time, 5000);
}

#[test]
fn test_no_clock_uses_default() {
    let tm = TimeManagement::new();
    let time = TimeManager::allocate_time(&tm, None, None, None, None, None, None, true);
    assert_eq!(time, tm.msec_per_move);
}

#[test]
fn test_huge_increment_saturates() {
    let tm = TimeManagement::new();
    let time =
        TimeManager::allocate_time(&tm, Some(1000), None, Some(u64::MAX), None, None, None, true);
    assert_eq!(time, u64::MAX / 10 + 50);

    let time = TimeManager::allocate_time(
        &tm,
        None,
        Some(u64::MAX),
        None,
        Some(u64::MAX),
        None,
        Some(1),
        false,
    );
    assert_eq!(time, u64::MAX / 2 + u64::MAX / 10);
}
