use std::cell::Cell;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

static ACCEPTANCE_TEST_DIR: &str = "acceptance_test";
static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

thread_local!(static TASK_ID: usize = NEXT_ID.fetch_add(1, Ordering::SeqCst));

// creates the root directory for the tests (once), and
// cleans out the root directory for the current task
fn init() {
    static GLOBAL_INIT: Once = Once::new();
    thread_local!(static LOCAL_INIT: Cell<bool> = Cell::new(false));
    GLOBAL_INIT.call_once(|| {
        global_root().mkdir_p();
    });
    LOCAL_INIT.with(|i| {
        if i.get() {
            return;
        }
        i.set(true);
        let root = global_root().join(task_dir());
        root.rm_rf();
        root.mkdir_p();
    })
}

// the root directory for the acceptance tests, in `target/acceptance_test`
fn global_root() -> PathBuf {
    let mut path = ok_or_panic! { env::current_exe() };
    path.pop(); // chop off exe name
    path.pop(); // chop off 'deps'
    path.pop(); // chop off 'debug'

    // If `cargo test` is run manually then our path looks like
    // `target/debug/deps/foo`, in which case our `path` is now pointing at
    // `target`. If, however, `cargo test --target $target` is used then the
    // output is `target/$target/debug/deps/foo`, so our path is pointing at
    // `target/$target`. Here we conditionally pop the `$target` name.
    if path.file_name().and_then(|s| s.to_str()) != Some("target") {
        path.pop();
    }

    path.join(ACCEPTANCE_TEST_DIR)
}

fn task_dir() -> String {
    TASK_ID.with(|my_id| format!("t{}", my_id))
}

/// The scratch directory of the current test, unique per test thread
pub fn root() -> PathBuf {
    init();
    global_root().join(task_dir())
}

pub trait PathExt {
    fn rm_rf(&self);
    fn mkdir_p(&self);
}

impl PathExt for Path {
    /* Technically there is a potential race condition, but we don't
     * care all that much for our tests
     */
    fn rm_rf(&self) {
        if !self.exists() {
            return;
        }
        fs::remove_dir_all(self)
            .unwrap_or_else(|e| panic!("failed to remove dir {}: {}", self.display(), e))
    }

    // create all paths up to the input path
    fn mkdir_p(&self) {
        fs::create_dir_all(self)
            .unwrap_or_else(|e| panic!("failed to mkdir_p {}: {}", self.display(), e))
    }
}
