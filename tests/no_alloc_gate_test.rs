//! The per-frame engine and render paths must not touch the heap.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use blockfall::core::{GameSession, GameSnapshot, SessionConfig};
use blockfall::term::{FrameBuffer, GameView, Viewport};
use blockfall::types::GameAction;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
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

// Both gates live in one test: the counter is process-wide and tests run on
// parallel threads.
#[test]
fn hot_paths_do_not_allocate() {
    let mut game = GameSession::new(SessionConfig::default(), 0);
    let mut snap = GameSnapshot::default();
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);
    let mut now = 0u64;

    let engine_allocs = with_alloc_counting(|| {
        for step in 0..5_000u64 {
            now += 16;
            let action = match step % 5 {
                0 => GameAction::MoveLeft,
                1 => GameAction::Rotate,
                2 => GameAction::MoveRight,
                _ => GameAction::SoftDrop,
            };
            game.apply_action(action, now);
            game.tick(now);
            let _ = game.take_signals();
            let _ = game.ghost_y();
            game.snapshot_into(&mut snap);
            if game.is_game_over() {
                game.reset(now);
            }
        }
    });
    assert_eq!(engine_allocs, 0);

    let render_allocs = with_alloc_counting(|| {
        for _ in 0..50 {
            view.render_into(&snap, viewport, &mut fb);
        }
    });
    assert_eq!(render_allocs, 0);
}
