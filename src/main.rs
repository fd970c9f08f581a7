use ksweep::entry;
use ksweep::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
