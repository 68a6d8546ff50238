// vadrtab: Reading, validating, and summarizing VADR annotation output tables.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Catalogue of the alert codes reported by VADR 1.x.
//!
//! Each alert code is eight lower-case characters and maps to a short
//! description (the `short description`/`alert description` columns of the
//! `.alc` and `.alt` files), a scope, and whether the alert causes the
//! sequence to fail by default. Whether an alert is fatal can be changed when
//! VADR is run, so the `fail` column of an `.alt` file has the final say.
//!
//! ## Usage
//!
//! ```rust
//! use vadrtab::alerts::lookup;
//! use vadrtab::records::AlertScope;
//!
//! let info = lookup("cdsstopn").unwrap();
//!
//! assert_eq!(info.short_desc, "CDS_HAS_STOP_CODON");
//! assert_eq!(info.scope, AlertScope::Feature);
//! assert!(info.fatal);
//! assert!(lookup("notacode").is_none());
//! ```
//!

use crate::records::AlertScope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertInfo {
    pub code: &'static str,
    pub short_desc: &'static str,
    pub scope: AlertScope,
    /// Fatal unless changed on the VADR command line.
    pub fatal: bool,
    pub long_desc: &'static str,
}

const fn seq(code: &'static str, short_desc: &'static str, fatal: bool, long_desc: &'static str) -> AlertInfo {
    AlertInfo { code, short_desc, scope: AlertScope::Sequence, fatal, long_desc }
}

const fn ftr(code: &'static str, short_desc: &'static str, fatal: bool, long_desc: &'static str) -> AlertInfo {
    AlertInfo { code, short_desc, scope: AlertScope::Feature, fatal, long_desc }
}

pub static ALERTS: &[AlertInfo] = &[
    // Classification
    seq("noannotn", "NO_ANNOTATION", true, "no significant similarity detected"),
    seq("revcompl", "REVCOMPLEM", true, "sequence appears to be reverse complemented"),
    seq("unexdivg", "UNEXPECTED_DIVERGENCE", true, "sequence is too divergent to confidently assign nucleotide-based annotation"),
    seq("qstgroup", "QUESTIONABLE_SPECIFIED_GROUP", false, "best predicted classification is in the specified group but the score difference to the runner-up is small"),
    seq("qstsbgrp", "QUESTIONABLE_SPECIFIED_SUBGROUP", false, "best predicted classification is in the specified subgroup but the score difference to the runner-up is small"),
    seq("incgroup", "INCORRECT_SPECIFIED_GROUP", true, "score difference too large between best overall model and best specified group model"),
    seq("incsbgrp", "INCORRECT_SPECIFIED_SUBGROUP", true, "score difference too large between best overall model and best specified subgroup model"),
    seq("indfclas", "INDEFINITE_CLASSIFICATION", true, "low score difference between best overall model and second best model (not in best model's subgroup)"),
    seq("lowscore", "LOW_SCORE", false, "score to homology model below low threshold"),
    seq("biasdseq", "BIASED_SEQUENCE", false, "high fraction of score attributed to biased sequence composition"),
    // Coverage
    seq("lowcovrg", "LOW_COVERAGE", true, "low sequence fraction with significant similarity to homology model"),
    seq("dupregin", "DUPLICATE_REGIONS", true, "similarity to a model region occurs more than once"),
    seq("discontn", "DISCONTINUOUS_SIMILARITY", true, "not all hits are in the same order in the sequence and the homology model"),
    seq("indfstrn", "INDEFINITE_STRAND", true, "significant similarity detected on both strands"),
    seq("lowsim5s", "LOW_SIMILARITY_START", true, "significant similarity not detected at 5' end of the sequence"),
    seq("lowsim3s", "LOW_SIMILARITY_END", true, "significant similarity not detected at 3' end of the sequence"),
    seq("lowsimis", "LOW_SIMILARITY", true, "internal region without significant similarity"),
    seq("extrant5", "EXTRA_SEQUENCE_START", false, "extra sequence detected 5' of expected sequence start"),
    seq("extrant3", "EXTRA_SEQUENCE_END", false, "extra sequence detected 3' of expected sequence end"),
    seq("ambgnt5s", "N_AT_START", false, "first nucleotide of the sequence is an N"),
    seq("ambgnt3s", "N_AT_END", false, "final nucleotide of the sequence is an N"),
    // Annotation of the whole sequence
    seq("unjoinbl", "UNJOINABLE_SUBSEQ_ALIGNMENTS", true, "inconsistent alignment of overlapping region between ungapped seed and flanking region"),
    seq("deletins", "DELETION_OF_FEATURE", true, "internal deletion of a complete feature"),
    seq("nmiscftr", "MULTIPLE_MISC_FEATURES", true, "too many features are reported as misc_features"),
    // Start and stop codons
    ftr("mutstart", "MUTATION_AT_START", true, "expected start codon could not be identified"),
    ftr("mutendcd", "MUTATION_AT_END", true, "expected stop codon could not be identified, predicted CDS stop by homology is invalid"),
    ftr("mutendns", "MUTATION_AT_END", true, "expected stop codon could not be identified, no in-frame stop codon exists 3' of predicted start codon"),
    ftr("mutendex", "MUTATION_AT_END", true, "expected stop codon could not be identified, first in-frame stop codon exists 3' of predicted stop position"),
    ftr("unexleng", "UNEXPECTED_LENGTH", true, "length of complete coding (CDS or mat_peptide) feature is not a multiple of 3"),
    ftr("cdsstopn", "CDS_HAS_STOP_CODON", true, "in-frame stop codon exists 5' of stop position predicted by homology to reference"),
    ftr("cdsstopp", "CDS_HAS_STOP_CODON", true, "stop codon in protein-based alignment"),
    // Frameshifts
    ftr("fsthicft", "POSSIBLE_FRAMESHIFT_HIGH_CONF", true, "high confidence possible frameshift in CDS (frame not restored before end)"),
    ftr("fsthicfi", "POSSIBLE_FRAMESHIFT_HIGH_CONF", true, "high confidence possible frameshift in CDS (frame restored before end)"),
    ftr("fstlocft", "POSSIBLE_FRAMESHIFT_LOW_CONF", false, "low confidence possible frameshift in CDS (frame not restored before end)"),
    ftr("fstlocfi", "POSSIBLE_FRAMESHIFT_LOW_CONF", false, "low confidence possible frameshift in CDS (frame restored before end)"),
    ftr("fstukcft", "POSSIBLE_FRAMESHIFT", true, "possible frameshift in CDS of uncertain confidence (frame not restored before end)"),
    ftr("fstukcfi", "POSSIBLE_FRAMESHIFT", true, "possible frameshift in CDS of uncertain confidence (frame restored before end)"),
    // Mature peptides
    ftr("peptrans", "PEPTIDE_TRANSLATION_PROBLEM", true, "mat_peptide may not be translated because its parent CDS has a problem"),
    ftr("pepadjcy", "PEPTIDE_ADJACENCY_PROBLEM", true, "predictions of two mat_peptides expected to be adjacent are not adjacent"),
    // Feature boundaries
    ftr("indfantp", "INDEFINITE_ANNOTATION", true, "protein-based search identifies CDS not identified in nucleotide-based search"),
    ftr("indfantn", "INDEFINITE_ANNOTATION", true, "nucleotide-based search identifies CDS not identified in protein-based search"),
    ftr("indf5gap", "INDEFINITE_ANNOTATION_START", true, "alignment to homology model is a gap at 5' boundary"),
    ftr("indf5lcc", "INDEFINITE_ANNOTATION_START", true, "alignment to homology model has low confidence at 5' boundary for feature that is or matches a CDS"),
    ftr("indf5lcn", "INDEFINITE_ANNOTATION_START", true, "alignment to homology model has low confidence at 5' boundary for feature that does not match a CDS"),
    ftr("indf5plg", "INDEFINITE_ANNOTATION_START", true, "protein-based alignment extends past nucleotide-based alignment at 5' end"),
    ftr("indf5pst", "INDEFINITE_ANNOTATION_START", true, "protein-based alignment does not extend close enough to nucleotide-based alignment 5' endpoint"),
    ftr("indf3gap", "INDEFINITE_ANNOTATION_END", true, "alignment to homology model is a gap at 3' boundary"),
    ftr("indf3lcc", "INDEFINITE_ANNOTATION_END", true, "alignment to homology model has low confidence at 3' boundary for feature that is or matches a CDS"),
    ftr("indf3lcn", "INDEFINITE_ANNOTATION_END", true, "alignment to homology model has low confidence at 3' boundary for feature that does not match a CDS"),
    ftr("indf3plg", "INDEFINITE_ANNOTATION_END", true, "protein-based alignment extends past nucleotide-based alignment at 3' end"),
    ftr("indf3pst", "INDEFINITE_ANNOTATION_END", true, "protein-based alignment does not extend close enough to nucleotide-based alignment 3' endpoint"),
    // Insertions and deletions
    ftr("insertnp", "INSERTION_OF_NT", true, "too large of an insertion in protein-based alignment"),
    ftr("insertnn", "INSERTION_OF_NT", true, "too large of an insertion in nucleotide-based alignment of CDS feature"),
    ftr("deletinp", "DELETION_OF_NT", true, "too large of a deletion in protein-based alignment"),
    ftr("deletinn", "DELETION_OF_NT", true, "too large of a deletion in nucleotide-based alignment of CDS feature"),
    ftr("deletinf", "DELETION_OF_FEATURE", true, "internal deletion of a complete feature"),
    // Similarity within features
    ftr("lowsim5c", "LOW_FEATURE_SIMILARITY_START", true, "region overlapping annotated CDS at 5' end lacks significant similarity"),
    ftr("lowsim5n", "LOW_FEATURE_SIMILARITY_START", true, "region overlapping annotated non-CDS feature at 5' end lacks significant similarity"),
    ftr("lowsim5l", "LOW_FEATURE_SIMILARITY_START", true, "long region overlapping annotated feature at 5' end lacks significant similarity"),
    ftr("lowsim3c", "LOW_FEATURE_SIMILARITY_END", true, "region overlapping annotated CDS at 3' end lacks significant similarity"),
    ftr("lowsim3n", "LOW_FEATURE_SIMILARITY_END", true, "region overlapping annotated non-CDS feature at 3' end lacks significant similarity"),
    ftr("lowsim3l", "LOW_FEATURE_SIMILARITY_END", true, "long region overlapping annotated feature at 3' end lacks significant similarity"),
    ftr("lowsimic", "LOW_FEATURE_SIMILARITY", true, "internal region overlapping annotated CDS lacks significant similarity"),
    ftr("lowsimin", "LOW_FEATURE_SIMILARITY", true, "internal region overlapping annotated non-CDS feature lacks significant similarity"),
    ftr("lowsimil", "LOW_FEATURE_SIMILARITY", true, "long internal region overlapping annotated feature lacks significant similarity"),
    // Ambiguous nucleotides at feature ends
    ftr("ambgnt5f", "N_AT_FEATURE_START", false, "first nucleotide of non-CDS feature is an N"),
    ftr("ambgnt3f", "N_AT_FEATURE_END", false, "final nucleotide of non-CDS feature is an N"),
    ftr("ambgnt5c", "N_AT_CDS_START", false, "first nucleotide of CDS is an N"),
    ftr("ambgnt3c", "N_AT_CDS_END", false, "final nucleotide of CDS is an N"),
];

/// Find the catalogue entry for `code`.
pub fn lookup(
    code: &str,
) -> Option<&'static AlertInfo> {
    ALERTS.iter().find(|info| info.code == code)
}

/// Check that `code` has the shape of an alert code.
///
/// Doesn't check that the code is in the catalogue.
pub fn is_valid_code(
    code: &str,
) -> bool {
    code.len() == 8 && code.bytes().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
