use super::SourceRequest;

pub enum Action {
    GenerationStart(SourceRequest),
    GenerationAbort(),
}
