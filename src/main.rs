use synthload::error::AppResult;

fn main() -> AppResult<()> {
    synthload::entry::run()
}
