//! Spoken phrases in the five supported languages
//!
//! Only the phrases the scan pipeline itself speaks live here; screen labels
//! belong to the front end.

use crate::types::AppLanguage;

/// A phrase the application announces out loud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    CameraReady,
    Processing,
    ResultPrefix,
    Offline,
    BackOnline,
    GenericError,
}

/// Look up `phrase` in `language`.
pub fn phrase(phrase: Phrase, language: AppLanguage) -> &'static str {
    use AppLanguage::*;
    use Phrase::*;

    match (phrase, language) {
        (CameraReady, English) => {
            "Camera is ready. Position the banknote in the frame and tap to capture."
        }
        (CameraReady, Hindi) => {
            "कैमरा तैयार है। नोट को फ्रेम में रखें और कैप्चर करने के लिए टैप करें।"
        }
        (CameraReady, Tamil) => "கேமரா தயாராக உள்ளது. நோட்டை பிரேமில் வைத்து தட்டவும்.",
        (CameraReady, Telugu) => {
            "కెమెరా సిద్ధంగా ఉంది. నోటును ఫ్రేమ్‌లో ఉంచి, క్యాప్చర్ చేయడానికి తాకండి."
        }
        (CameraReady, Bengali) => {
            "ক্যামেরা প্রস্তুত। নোটটি ফ্রেমে রাখুন এবং ক্যাপচার করতে ট্যাপ করুন।"
        }

        (Processing, English) => "Processing the image. Please wait.",
        (Processing, Hindi) => "छवि प्रोसेस हो रही है। कृपया प्रतीक्षा करें।",
        (Processing, Tamil) => "படத்தை செயலாக்குகிறது. தயவுசெய்து காத்திருக்கவும்.",
        (Processing, Telugu) => "చిత్రాన్ని ప్రాసెస్ చేస్తున్నాము. దయచేసి వేచి ఉండండి.",
        (Processing, Bengali) => "ছবি প্রসেস করা হচ্ছে। অনুগ্রহ করে অপেক্ষা করুন।",

        (ResultPrefix, English) => "The banknote is identified as",
        (ResultPrefix, Hindi) => "नोट की पहचान हुई है",
        (ResultPrefix, Tamil) => "நோட்டு அடையாளம் காணப்பட்டது",
        (ResultPrefix, Telugu) => "నోటు గుర్తించబడింది",
        (ResultPrefix, Bengali) => "নোটটি চিহ্নিত করা হয়েছে",

        (Offline, English) => "You are offline. Some features may be limited.",
        (Offline, Hindi) => "आप ऑफलाइन हैं। कुछ सुविधाएँ सीमित हो सकती हैं।",
        (Offline, Tamil) => "நீங்கள் ஆஃப்லைனில் உள்ளீர்கள். சில அம்சங்கள் வரம்புக்குட்பட்டவை.",
        (Offline, Telugu) => "మీరు ఆఫ్‌లైన్‌లో ఉన్నారు. కొన్ని ఫీచర్లు పరిమితం కావచ్చు.",
        (Offline, Bengali) => "আপনি অফলাইন আছেন। কিছু বৈশিষ্ট্য সীমিত হতে পারে।",

        (BackOnline, English) => "You are back online.",
        (BackOnline, Hindi) => "आप फिर से ऑनलाइन हैं।",
        (BackOnline, Tamil) => "நீங்கள் மீண்டும் ஆன்லைனில் உள்ளீர்கள்.",
        (BackOnline, Telugu) => "మీరు తిరిగి ఆన్‌లైన్‌లో ఉన్నారు.",
        (BackOnline, Bengali) => "আপনি আবার অনলাইনে আছেন।",

        (GenericError, English) => "An error occurred. Please try again.",
        (GenericError, Hindi) => "एक त्रुटि हुई। कृपया पुन: प्रयास करें।",
        (GenericError, Tamil) => "பிழை ஏற்பட்டது. தயவுசெய்து மீண்டும் முயற்சிக்கவும்.",
        (GenericError, Telugu) => "లోపం సంభవించింది. దయచేసి మళ్ళీ ప్రయత్నించండి.",
        (GenericError, Bengali) => "একটি ত্রুটি ঘটেছে। অনুগ্রহ করে আবার চেষ্টা করুন।",
    }
}

/// Compose the spoken result announcement, e.g.
/// "The banknote is identified as 500 rupees".
pub fn result_announcement(label: &str, language: AppLanguage) -> String {
    format!("{} {}", phrase(Phrase::ResultPrefix, language), label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_phrase_has_every_language() {
        let phrases = [
            Phrase::CameraReady,
            Phrase::Processing,
            Phrase::ResultPrefix,
            Phrase::Offline,
            Phrase::BackOnline,
            Phrase::GenericError,
        ];
        for p in phrases {
            for lang in AppLanguage::ALL {
                assert!(!phrase(p, lang).is_empty(), "{:?}/{:?} missing", p, lang);
            }
        }
    }

    #[test]
    fn test_result_announcement_contains_label() {
        let text = result_announcement("500 rupees", AppLanguage::English);
        assert_eq!(text, "The banknote is identified as 500 rupees");

        let text = result_announcement("₹100", AppLanguage::Hindi);
        assert!(text.contains("₹100"));
    }
}
