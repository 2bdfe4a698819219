use uuid::Uuid;

/// Carried between stages so a failure in one does not break the downstream
/// topology; each stage accepts and returns the same shape (spec §4.6).
#[derive(Debug, Clone, Copy)]
pub struct PipelineContext {
    pub session_id: Uuid,
    pub job_id: Uuid,
    pub owner_id: Uuid,
}

#[derive(Debug, Default)]
pub struct StageCounts {
    pub attempted: u32,
    pub failed: u32,
}

impl StageCounts {
    pub fn record(&mut self, ok: bool) {
        self.attempted += 1;
        if !ok {
            self.failed += 1;
        }
    }
}

#[derive(Debug, Default)]
pub struct PipelineRunReport {
    pub transcription: StageCounts,
    pub image_description: StageCounts,
    pub embedding: StageCounts,
}
