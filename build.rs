fn main() {
    // Only run winres on Windows targets
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        // Path is relative to the crate root
        res.set_icon("src/icon.ico");
        res.set("ProductName", "midi-note-editor");
        res.set("FileDescription", "MIDI Note Editor - file transposer");
        match res.compile() {
            Ok(_) => println!("cargo:warning=winres: icon embedded"),
            Err(e) => println!("cargo:warning=winres failed: {}", e),
        }
    }
}
