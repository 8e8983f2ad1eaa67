use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use blocktris::core::{EngineConfig, GameEngine, GameSnapshot};
use blocktris::types::GameAction;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn core_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut engine = GameEngine::in_memory(EngineConfig::seeded(1));
    engine.reset();
    let mut snap = GameSnapshot::default();

    // Warm-up.
    let _ = engine.apply_action(GameAction::MoveDown);
    let _ = engine.apply_action(GameAction::MoveLeft);

    let allocs = with_alloc_counting(|| {
        // Gravity steps should be allocation-free.
        for _ in 0..200 {
            let _ = engine.move_down();
            if engine.is_game_over() {
                engine.reset();
            }
        }

        // Common actions should be allocation-free.
        for _ in 0..50 {
            let _ = engine.apply_action(GameAction::MoveLeft);
            let _ = engine.apply_action(GameAction::MoveRight);
            let _ = engine.apply_action(GameAction::Rotate);
            let _ = engine.apply_action(GameAction::Hold);
            engine.snapshot_into(&mut snap);
        }

        // Hard drop drives lock/line-clear and piece spawning paths.
        for _ in 0..25 {
            let _ = engine.apply_action(GameAction::HardDrop);
            let _ = engine.take_last_event();
            if engine.is_game_over() {
                let _ = engine.apply_action(GameAction::Reset);
            }
        }
    });

    assert!(allocs == 0);
}
