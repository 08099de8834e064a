//! Synthesis pipeline orchestration.
//!
//! This module coordinates passage splitting, per-paragraph backend calls,
//! and segment concatenation into the final output file.

mod pipeline;

pub use pipeline::{
    FINAL_OUTPUT_NAME, PassageReport, PassageRequest, Pipeline, PipelineError, segment_path,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, HealthResponse, MockBackend};
    use crate::cli::SynthesisJob;
    use crate::text::VoiceMap;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Minimal valid 16-bit PCM WAV for mock responses.
    fn fake_wav(samples: &[i16]) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 24000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn passage_request(temp_dir: &TempDir, passage: &str) -> PassageRequest {
        let passage_path = temp_dir.path().join("passage.txt");
        std::fs::write(&passage_path, passage).unwrap();

        PassageRequest {
            passage_path,
            speaker: None,
            output_dir: temp_dir.path().join("out"),
            voice_map: VoiceMap::default(),
            default_lang: "en".to_string(),
            speed: 1.0,
        }
    }

    // ===========================================
    // Health check tests
    // ===========================================

    #[test]
    fn test_pipeline_health_check() {
        let mut mock = MockBackend::new();
        mock.expect_health().times(1).returning(|| {
            Ok(HealthResponse {
                status: "healthy".to_string(),
                model: "xtts_v2".to_string(),
                cuda_available: true,
                device: Some("cuda:0".to_string()),
            })
        });

        let pipeline = Pipeline::new(mock);
        let health = pipeline.health_check().unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_pipeline_health_check_failure() {
        let mut mock = MockBackend::new();
        mock.expect_health()
            .times(1)
            .returning(|| Err(BackendError::ConnectionFailed("refused".to_string())));

        let pipeline = Pipeline::new(mock);
        assert!(pipeline.health_check().is_err());
    }

    // ===========================================
    // Passage mode tests
    // ===========================================

    #[test]
    fn test_run_passage_writes_segments_and_final() {
        let temp_dir = TempDir::new().unwrap();
        let request = passage_request(&temp_dir, "First paragraph.\nSecond paragraph.\n");

        let mut mock = MockBackend::new();
        mock.expect_synthesize()
            .times(2)
            .returning(|_| Ok(fake_wav(&[1, 2, 3])));

        let pipeline = Pipeline::new(mock);
        let report = pipeline.run_passage(&request).unwrap();

        assert_eq!(report.segments.len(), 2);
        assert_eq!(report.segments[0], request.output_dir.join("para_1.wav"));
        assert_eq!(report.segments[1], request.output_dir.join("para_2.wav"));
        assert!(report.segments.iter().all(|p| p.exists()));

        assert_eq!(report.final_path, request.output_dir.join("final_output.wav"));
        assert!(report.final_path.exists());
        assert_eq!(report.total_samples, 6);

        let mut reader = hound::WavReader::open(&report.final_path).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples, vec![1, 2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_run_passage_applies_voice_map() {
        let temp_dir = TempDir::new().unwrap();
        let mut request = passage_request(&temp_dir, "Hello.\nBonjour.\nHallo again.\n");
        request.voice_map =
            VoiceMap::parse(r#"[{"lang": "en"}, {"lang": "fr", "voice": "siwis"}]"#).unwrap();
        request.default_lang = "de".to_string();

        let mut mock = MockBackend::new();
        mock.expect_synthesize()
            .withf(|req| match req.text.as_str() {
                "Hello." => req.lang == "en" && req.voice.is_none(),
                "Bonjour." => req.lang == "fr" && req.voice.as_deref() == Some("siwis"),
                // Past the map: falls back to the requested default
                "Hallo again." => req.lang == "de" && req.voice.is_none(),
                _ => false,
            })
            .times(3)
            .returning(|_| Ok(fake_wav(&[0])));

        let pipeline = Pipeline::new(mock);
        pipeline.run_passage(&request).unwrap();
    }

    #[test]
    fn test_run_passage_attaches_speaker() {
        let temp_dir = TempDir::new().unwrap();
        let speaker_path = temp_dir.path().join("speaker.wav");
        std::fs::write(&speaker_path, fake_wav(&[9])).unwrap();

        let mut request = passage_request(&temp_dir, "Cloned line.\n");
        request.speaker = Some(speaker_path.clone());

        let mut mock = MockBackend::new();
        mock.expect_synthesize()
            .withf(move |req| req.speaker.as_deref() == Some(speaker_path.as_path()))
            .times(1)
            .returning(|_| Ok(fake_wav(&[0])));

        let pipeline = Pipeline::new(mock);
        pipeline.run_passage(&request).unwrap();
    }

    #[test]
    fn test_run_passage_empty_passage() {
        let temp_dir = TempDir::new().unwrap();
        let request = passage_request(&temp_dir, "   \n\n  \n");

        let mock = MockBackend::new();
        let pipeline = Pipeline::new(mock);

        let result = pipeline.run_passage(&request);
        assert!(matches!(result.unwrap_err(), PipelineError::EmptyPassage));
    }

    #[test]
    fn test_run_passage_speaker_missing() {
        let temp_dir = TempDir::new().unwrap();
        let mut request = passage_request(&temp_dir, "Some text.\n");
        request.speaker = Some(PathBuf::from("/nonexistent/speaker.wav"));

        let mock = MockBackend::new();
        let pipeline = Pipeline::new(mock);

        let result = pipeline.run_passage(&request);
        assert!(matches!(
            result.unwrap_err(),
            PipelineError::SpeakerNotFound(_)
        ));
    }

    #[test]
    fn test_run_passage_creates_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut request = passage_request(&temp_dir, "Line.\n");
        request.output_dir = temp_dir.path().join("nested").join("out");

        let mut mock = MockBackend::new();
        mock.expect_synthesize()
            .times(1)
            .returning(|_| Ok(fake_wav(&[0])));

        let pipeline = Pipeline::new(mock);
        pipeline.run_passage(&request).unwrap();

        assert!(request.output_dir.join("final_output.wav").exists());
    }

    #[test]
    fn test_run_passage_backend_error_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let request = passage_request(&temp_dir, "Line.\n");

        let mut mock = MockBackend::new();
        mock.expect_synthesize()
            .times(1)
            .returning(|_| Err(BackendError::BackendError("model crashed".to_string())));

        let pipeline = Pipeline::new(mock);
        let result = pipeline.run_passage(&request);

        assert!(matches!(
            result.unwrap_err(),
            PipelineError::BackendError(_)
        ));
        // Nothing should be left behind for the failed first paragraph
        assert!(!request.output_dir.join("final_output.wav").exists());
    }

    #[test]
    fn test_run_passage_rejects_non_wav_segment() {
        let temp_dir = TempDir::new().unwrap();
        let request = passage_request(&temp_dir, "Line.\n");

        let mut mock = MockBackend::new();
        mock.expect_synthesize()
            .times(1)
            .returning(|_| Ok(b"<html>502 Bad Gateway</html>".to_vec()));

        let pipeline = Pipeline::new(mock);
        let result = pipeline.run_passage(&request);

        assert!(matches!(result.unwrap_err(), PipelineError::AudioError(_)));
    }

    // ===========================================
    // Job mode tests
    // ===========================================

    #[test]
    fn test_run_job_writes_output() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("speech.wav");

        let job = SynthesisJob::from_json_line(&format!(
            r#"{{"text": "Hello.", "lang": "en", "out": "{}"}}"#,
            out.display()
        ))
        .unwrap();

        let mut mock = MockBackend::new();
        mock.expect_synthesize()
            .withf(|req| req.text == "Hello." && req.lang == "en")
            .times(1)
            .returning(|_| Ok(fake_wav(&[1, 2])));

        let pipeline = Pipeline::new(mock);
        let written = pipeline.run_job(&job).unwrap();

        assert_eq!(written, out);
        assert!(out.exists());
    }

    #[test]
    fn test_run_job_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("deep").join("dir").join("speech.wav");

        let job = SynthesisJob::from_json_line(&format!(
            r#"{{"text": "Hello.", "out": "{}"}}"#,
            out.display()
        ))
        .unwrap();

        let mut mock = MockBackend::new();
        mock.expect_synthesize()
            .times(1)
            .returning(|_| Ok(fake_wav(&[1])));

        let pipeline = Pipeline::new(mock);
        pipeline.run_job(&job).unwrap();

        assert!(out.exists());
    }

    #[test]
    fn test_run_job_rejects_non_wav_response() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("speech.wav");

        let job = SynthesisJob::from_json_line(&format!(
            r#"{{"text": "Hello.", "out": "{}"}}"#,
            out.display()
        ))
        .unwrap();

        let mut mock = MockBackend::new();
        mock.expect_synthesize()
            .times(1)
            .returning(|_| Ok(b"oops".to_vec()));

        let pipeline = Pipeline::new(mock);
        let result = pipeline.run_job(&job);

        assert!(matches!(result.unwrap_err(), PipelineError::AudioError(_)));
        assert!(!out.exists());
    }

    // ===========================================
    // Segment naming
    // ===========================================

    #[test]
    fn test_segment_path_is_one_based() {
        let dir = PathBuf::from("/tmp/out");
        assert_eq!(segment_path(&dir, 0), dir.join("para_1.wav"));
        assert_eq!(segment_path(&dir, 4), dir.join("para_5.wav"));
    }
}
