use super::TestCase;

pub enum Event {
    FolderCreating(),
    FolderReady(String),
    TestCaseArrived(TestCase),
    TestCaseStored(String),
    GenerationDone(usize),
    GenerationError(String),
    GenerationRejected(String),
    KeyboardChar(char),
    KeyboardCTRLC(),
    KeyboardEsc(),
    UIScrollDown(),
    UIScrollUp(),
    UITick(),
}
